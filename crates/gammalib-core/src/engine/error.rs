use thiserror::Error;

use super::config::ConfigError;
use super::query::QueryError;
use crate::core::io::delimited::DataLoadError;
use crate::core::tables::elements::LookupError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load reference data: {source}")]
    Load {
        #[from]
        source: DataLoadError,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("No gamma library named '{0}'")]
    LibraryNotFound(String),

    #[error("A gamma library named '{0}' is already registered")]
    DuplicateLibrary(String),
}
