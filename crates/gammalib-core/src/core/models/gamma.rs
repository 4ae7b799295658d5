use super::nuclide::Nuclide;
use crate::core::measured::{MeasuredValue, UNKNOWN_PLACEHOLDER};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// One gamma-ray emission line of a nuclide.
///
/// Lines are totally ordered by energy (ascending, unknown energies last) with ties broken
/// by the identity key, so two lines compare equal only when they share both.
#[derive(Debug, Clone)]
pub struct GammaLine {
    nuclide: Arc<Nuclide>,
    energy: MeasuredValue,
    sigma: Option<MeasuredValue>,
    intensity: Option<MeasuredValue>,
    id: String,
}

impl GammaLine {
    /// Creates a line.
    ///
    /// # Arguments
    ///
    /// * `nuclide` - The emitting nuclide
    /// * `energy` - Line energy in keV
    /// * `sigma` - Partial capture cross-section in barns, `None` if the library has none
    /// * `intensity` - Emission probability as a fraction, `None` if the library has none
    pub fn new(
        nuclide: Arc<Nuclide>,
        energy: MeasuredValue,
        sigma: Option<MeasuredValue>,
        intensity: Option<MeasuredValue>,
    ) -> Self {
        let id = match energy.value() {
            Some(e) => format!("{}@{}", nuclide.id(), e.trunc() as i64),
            None => format!("{}@{}", nuclide.id(), UNKNOWN_PLACEHOLDER),
        };
        Self {
            nuclide,
            energy,
            sigma,
            intensity,
            id,
        }
    }

    /// Identity key of the form `"{nuclide_id}@{truncated energy}"`, e.g. `"60-Ni@1332"`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn nuclide(&self) -> &Nuclide {
        &self.nuclide
    }

    #[inline]
    pub fn nuclide_id(&self) -> &str {
        self.nuclide.id()
    }

    #[inline]
    pub fn z(&self) -> u32 {
        self.nuclide.z()
    }

    #[inline]
    pub fn a(&self) -> u32 {
        self.nuclide.a()
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        self.nuclide.symbol()
    }

    #[inline]
    pub fn energy(&self) -> MeasuredValue {
        self.energy
    }

    #[inline]
    pub fn sigma(&self) -> Option<MeasuredValue> {
        self.sigma
    }

    #[inline]
    pub fn intensity(&self) -> Option<MeasuredValue> {
        self.intensity
    }
}

impl PartialEq for GammaLine {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GammaLine {}

impl PartialOrd for GammaLine {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GammaLine {
    fn cmp(&self, other: &Self) -> Ordering {
        self.energy
            .cmp_unknown_last(&other.energy)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for GammaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID:        {}", self.id)?;
        writeln!(f, "Energy:    {}", self.energy.with_unit("keV"))?;
        if let Some(sigma) = &self.sigma {
            writeln!(f, "Sigma:     {}", sigma.with_unit("b"))?;
        }
        if let Some(intensity) = self.intensity {
            writeln!(f, "Intensity: {}", (intensity * 100.0).with_unit("%"))?;
        }
        Ok(())
    }
}
