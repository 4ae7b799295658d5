//! Reading of the flat reference files.
//!
//! All reference data ships as UTF-8 comma-separated text with a header row and fixed
//! positional columns. [`delimited`] turns such a file into numbered rows and owns the
//! structural error taxonomy, [`gamma`] knows the column layouts of the gamma-line
//! library formats, and [`traits`] defines the seam through which a gamma library
//! obtains its lines.

pub mod delimited;
pub mod gamma;
pub mod traits;
