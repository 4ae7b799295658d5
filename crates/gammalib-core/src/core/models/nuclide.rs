use super::element::Element;
use crate::core::measured::MeasuredValue;
use std::fmt;
use std::sync::Arc;

/// One nuclide (isotope) of an element.
///
/// The nuclide holds a shared, read-only reference to its parent [`Element`]; the atomic
/// number, symbol and name are read through it rather than stored again.
#[derive(Debug, Clone)]
pub struct Nuclide {
    element: Arc<Element>,
    a: u32,
    atomic_mass: MeasuredValue,
    abundance: MeasuredValue,
    sigma: MeasuredValue,
    id: String,
}

impl Nuclide {
    /// Creates a nuclide.
    ///
    /// # Arguments
    ///
    /// * `element` - The parent element
    /// * `a` - Mass number
    /// * `atomic_mass` - Atomic mass in u
    /// * `abundance` - Natural abundance as a fraction in `0..=1`, unknown for unstable nuclides
    /// * `sigma` - Thermal neutron capture cross-section in barns
    pub fn new(
        element: Arc<Element>,
        a: u32,
        atomic_mass: MeasuredValue,
        abundance: MeasuredValue,
        sigma: MeasuredValue,
    ) -> Self {
        let id = format!("{}-{}", a, element.symbol());
        Self {
            element,
            a,
            atomic_mass,
            abundance,
            sigma,
            id,
        }
    }

    /// Identity key of the form `"{A}-{Symbol}"`, e.g. `"197-Au"`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn element(&self) -> &Element {
        &self.element
    }

    #[inline]
    pub fn z(&self) -> u32 {
        self.element.z()
    }

    #[inline]
    pub fn a(&self) -> u32 {
        self.a
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        self.element.symbol()
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.element.name()
    }

    #[inline]
    pub fn atomic_mass(&self) -> MeasuredValue {
        self.atomic_mass
    }

    #[inline]
    pub fn abundance(&self) -> MeasuredValue {
        self.abundance
    }

    #[inline]
    pub fn sigma(&self) -> MeasuredValue {
        self.sigma
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID:            {}", self.id)?;
        writeln!(f, "Z:             {}", self.z())?;
        writeln!(f, "A:             {}", self.a)?;
        writeln!(f, "Atomic mass:   {}", self.atomic_mass.with_unit("u"))?;
        writeln!(f, "Abundance:     {}", (self.abundance * 100.0).with_unit("%"))?;
        writeln!(f, "Sigma_0:       {}", self.sigma.with_unit("b"))
    }
}
