use crate::core::io::gamma::LibraryKind;
use std::path::PathBuf;
use thiserror::Error;

/// Fuzziness (keV for energies) applied when a query does not set its own.
pub const DEFAULT_FUZZINESS: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Gamma library '{0}' is configured more than once")]
    DuplicateLibrary(String),

    #[error("Invalid fuzziness '{value}' for gamma library '{library}': must be a finite, non-negative number")]
    InvalidFuzziness { library: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryConfig {
    pub name: String,
    pub kind: LibraryKind,
    pub path: PathBuf,
    pub fuzziness: f64,
}

impl LibraryConfig {
    pub fn new(name: &str, kind: LibraryKind, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            kind,
            path,
            fuzziness: DEFAULT_FUZZINESS,
        }
    }

    pub fn with_fuzziness(mut self, fuzziness: f64) -> Self {
        self.fuzziness = fuzziness;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub elements_path: PathBuf,
    pub nuclides_path: PathBuf,
    pub libraries: Vec<LibraryConfig>,
}

#[derive(Default)]
pub struct DatabaseConfigBuilder {
    elements_path: Option<PathBuf>,
    nuclides_path: Option<PathBuf>,
    libraries: Vec<LibraryConfig>,
}

impl DatabaseConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements_path(mut self, path: PathBuf) -> Self {
        self.elements_path = Some(path);
        self
    }
    pub fn nuclides_path(mut self, path: PathBuf) -> Self {
        self.nuclides_path = Some(path);
        self
    }
    pub fn library(mut self, library: LibraryConfig) -> Self {
        self.libraries.push(library);
        self
    }

    pub fn build(self) -> Result<DatabaseConfig, ConfigError> {
        for (i, library) in self.libraries.iter().enumerate() {
            if !library.fuzziness.is_finite() || library.fuzziness < 0.0 {
                return Err(ConfigError::InvalidFuzziness {
                    library: library.name.clone(),
                    value: library.fuzziness.to_string(),
                });
            }
            if self.libraries[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&library.name))
            {
                return Err(ConfigError::DuplicateLibrary(library.name.clone()));
            }
        }

        Ok(DatabaseConfig {
            elements_path: self
                .elements_path
                .ok_or(ConfigError::MissingParameter("elements_path"))?,
            nuclides_path: self
                .nuclides_path
                .ok_or(ConfigError::MissingParameter("nuclides_path"))?,
            libraries: self.libraries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::new()
            .elements_path("elements.dat".into())
            .nuclides_path("nuclides.dat".into())
    }

    #[test]
    fn build_applies_default_fuzziness() {
        let config = base()
            .library(LibraryConfig::new("pgaa", LibraryKind::Prompt, "prompt.dat".into()))
            .build()
            .unwrap();
        assert_eq!(config.libraries.len(), 1);
        assert_eq!(config.libraries[0].fuzziness, DEFAULT_FUZZINESS);
    }

    #[test]
    fn build_without_libraries_is_valid() {
        assert!(base().build().unwrap().libraries.is_empty());
    }

    #[test]
    fn missing_paths_are_reported() {
        let err = DatabaseConfigBuilder::new()
            .nuclides_path("n.dat".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("elements_path"));

        let err = DatabaseConfigBuilder::new()
            .elements_path("e.dat".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("nuclides_path"));
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let err = base()
            .library(LibraryConfig::new("PGAA", LibraryKind::Prompt, "a.dat".into()))
            .library(LibraryConfig::new("pgaa", LibraryKind::Decay, "b.dat".into()))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLibrary("pgaa".to_string()));
    }

    #[test]
    fn negative_fuzziness_is_rejected() {
        let err = base()
            .library(
                LibraryConfig::new("decay", LibraryKind::Decay, "d.dat".into()).with_fuzziness(-0.5),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFuzziness { ref library, .. } if library == "decay"));
    }
}
