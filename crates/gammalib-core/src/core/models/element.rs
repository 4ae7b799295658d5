use crate::core::measured::MeasuredValue;
use std::fmt;

/// Highest atomic number accepted by the element loader.
pub const MAX_ATOMIC_NUMBER: u32 = 118;

/// One chemical element of the periodic table.
///
/// Elements are immutable once loaded. `z` is always within `1..=MAX_ATOMIC_NUMBER`
/// for elements produced by [`ElementTable`](crate::core::tables::elements::ElementTable).
#[derive(Debug, Clone)]
pub struct Element {
    z: u32,
    symbol: String,
    name: String,
    atomic_mass: MeasuredValue,
}

impl Element {
    pub fn new(z: u32, symbol: &str, name: &str, atomic_mass: MeasuredValue) -> Self {
        Self {
            z,
            symbol: symbol.to_string(),
            name: name.to_string(),
            atomic_mass,
        }
    }

    #[inline]
    pub fn z(&self) -> u32 {
        self.z
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Standard atomic weight in unified atomic mass units (u).
    #[inline]
    pub fn atomic_mass(&self) -> MeasuredValue {
        self.atomic_mass
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:          {}", self.name)?;
        writeln!(f, "Z:             {}", self.z)?;
        writeln!(f, "Symbol:        {}", self.symbol)?;
        writeln!(f, "Atomic mass:   {}", self.atomic_mass.with_unit("u"))
    }
}
