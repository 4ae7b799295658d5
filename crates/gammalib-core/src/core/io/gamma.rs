use super::delimited::{DataLoadError, DelimitedFile, MalformedKind, Row};
use super::traits::GammaSource;
use crate::core::models::gamma::GammaLine;
use crate::core::tables::nuclides::NuclideTable;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

const COL_Z: usize = 0;
const COL_A: usize = 1;
const COL_ENERGY: usize = 2;

/// The kinds of gamma-line libraries, each with its own file layout and query fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryKind {
    /// Prompt gammas following thermal neutron capture.
    /// Columns: `Z, A, Energy (keV), Sigma (b), Intensity (%)`.
    Prompt,
    /// Gammas following radioactive decay, without cross-sections.
    /// Columns: `Z, A, Energy (keV), Intensity (%)`.
    Decay,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown library kind '{0}'. Expected 'prompt' or 'decay'.")]
pub struct UnknownLibraryKind(pub String);

impl LibraryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Decay => "decay",
        }
    }

    fn columns(&self) -> usize {
        match self {
            Self::Prompt => 5,
            Self::Decay => 4,
        }
    }

    fn sigma_column(&self) -> Option<usize> {
        match self {
            Self::Prompt => Some(3),
            Self::Decay => None,
        }
    }

    fn intensity_column(&self) -> usize {
        match self {
            Self::Prompt => 4,
            Self::Decay => 3,
        }
    }
}

impl FromStr for LibraryKind {
    type Err = UnknownLibraryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" | "pgaa" => Ok(Self::Prompt),
            "decay" => Ok(Self::Decay),
            _ => Err(UnknownLibraryKind(s.to_string())),
        }
    }
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the lines of a library file of the given kind.
///
/// Intensities are converted from percent to fractions, and the result is sorted by the
/// line order (energy, then identity key).
///
/// # Errors
///
/// Returns `DataLoadError::Malformed` for short rows, unparsable Z or A, and a (Z, A) pair
/// missing from `nuclides`. Empty or malformed energies, cross-sections and intensities
/// load as unknown.
pub fn read_lines(
    file: &DelimitedFile,
    kind: LibraryKind,
    nuclides: &NuclideTable,
) -> Result<Vec<GammaLine>, DataLoadError> {
    let mut lines = Vec::with_capacity(file.len());
    for row in file.rows(kind.columns()) {
        lines.push(read_line(&row?, kind, nuclides)?);
    }
    lines.sort();
    Ok(lines)
}

fn read_line(
    row: &Row<'_>,
    kind: LibraryKind,
    nuclides: &NuclideTable,
) -> Result<GammaLine, DataLoadError> {
    let z = row.required_u32(COL_Z, "Z")?;
    let a = row.required_u32(COL_A, "A")?;
    let nuclide = nuclides
        .get(z, a)
        .ok_or_else(|| row.malformed(MalformedKind::UnknownNuclide { z, a }))?;

    let energy = row.measured(COL_ENERGY, "Energy");
    let sigma = kind.sigma_column().map(|col| row.measured(col, "Sigma"));
    let intensity = row.measured(kind.intensity_column(), "Intensity") / 100.0;

    Ok(GammaLine::new(Arc::clone(nuclide), energy, sigma, Some(intensity)))
}

/// A gamma library backed by a delimited file on disk.
#[derive(Debug, Clone)]
pub struct DelimitedGammaSource {
    path: PathBuf,
    kind: LibraryKind,
}

impl DelimitedGammaSource {
    pub fn new(path: &Path, kind: LibraryKind) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> LibraryKind {
        self.kind
    }
}

impl GammaSource for DelimitedGammaSource {
    fn describe(&self) -> String {
        format!("{} library '{}'", self.kind, self.path.display())
    }

    fn load(&self, nuclides: &NuclideTable) -> Result<Vec<GammaLine>, DataLoadError> {
        let file = DelimitedFile::open(&self.path)?;
        read_lines(&file, self.kind, nuclides)
    }
}
