mod defaults;
mod file;

pub use file::FileConfig;

use crate::data::DataManager;
use crate::error::{CliError, Result};
use defaults::{DEFAULT_LIBRARIES, ELEMENTS_FILE, NUCLIDES_FILE};
use gammalib::core::io::gamma::LibraryKind;
use gammalib::engine::config::{DatabaseConfig, DatabaseConfigBuilder, LibraryConfig};
use gammalib::engine::error::EngineError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds the database configuration from an optional config file and the data directory.
///
/// Paths in the file are relative to the data directory. Table paths missing from the file
/// default to the standard file names. Without any `[[library]]` entry, every default
/// library whose file exists in the data directory is registered.
pub fn resolve_database_config(
    file: Option<FileConfig>,
    data_manager: &DataManager,
) -> Result<DatabaseConfig> {
    let file = file.unwrap_or_default();
    let data = file.data.unwrap_or_default();

    let table_path = |configured: Option<PathBuf>, default: &str| {
        data_manager.resolve(configured.as_deref().unwrap_or(Path::new(default)))
    };

    let mut builder = DatabaseConfigBuilder::new()
        .elements_path(table_path(data.elements, ELEMENTS_FILE))
        .nuclides_path(table_path(data.nuclides, NUCLIDES_FILE));

    if file.libraries.is_empty() {
        for library in DEFAULT_LIBRARIES {
            let path = data_manager.resolve(Path::new(library.file));
            if path.exists() {
                builder = builder.library(LibraryConfig::new(library.name, library.kind, path));
            } else {
                debug!("Default library '{}' not found at {:?}", library.name, path);
            }
        }
    } else {
        for library in file.libraries {
            let kind: LibraryKind = library
                .kind
                .parse()
                .map_err(|e| CliError::Config(format!("Library '{}': {}", library.name, e)))?;
            let mut config = LibraryConfig::new(&library.name, kind, data_manager.resolve(&library.path));
            if let Some(fuzziness) = library.fuzziness {
                config = config.with_fuzziness(fuzziness);
            }
            builder = builder.library(config);
        }
    }

    builder.build().map_err(|e| CliError::from(EngineError::from(e)))
}

/// Reads the config file (if any) and resolves it against the data directory.
pub fn load(config_path: Option<&Path>, data_manager: &DataManager) -> Result<DatabaseConfig> {
    let file = config_path.map(FileConfig::from_file).transpose()?;
    resolve_database_config(file, data_manager)
}
