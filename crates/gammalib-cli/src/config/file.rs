use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileDataConfig {
    pub elements: Option<PathBuf>,
    pub nuclides: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileLibraryConfig {
    pub name: String,
    pub kind: String,
    pub path: PathBuf,
    pub fuzziness: Option<f64>,
}

/// The database configuration file.
///
/// ```toml
/// [data]
/// elements = "elements.dat"
/// nuclides = "nuclides.dat"
///
/// [[library]]
/// name = "pgaa"
/// kind = "prompt"
/// path = "prompt.dat"
/// fuzziness = 0.5
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub data: Option<FileDataConfig>,
    #[serde(default, rename = "library")]
    pub libraries: Vec<FileLibraryConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
