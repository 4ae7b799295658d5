use super::delimited::DataLoadError;
use crate::core::models::gamma::GammaLine;
use crate::core::tables::nuclides::NuclideTable;

/// Defines where a gamma library obtains its lines.
///
/// A source is consulted exactly once, when its library is first opened. Implementors
/// resolve each line's nuclide through the supplied table so that lines share the
/// table's records instead of owning copies.
pub trait GammaSource: Send + Sync {
    /// Human-readable origin of the lines, used in log messages.
    fn describe(&self) -> String;

    /// Loads every line of the library.
    ///
    /// # Errors
    ///
    /// Returns a `DataLoadError` if the data cannot be read or is structurally malformed;
    /// the library then stays unusable.
    fn load(&self, nuclides: &NuclideTable) -> Result<Vec<GammaLine>, DataLoadError>;
}
