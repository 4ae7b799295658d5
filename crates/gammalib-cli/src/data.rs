use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PATH_CONFIG_FILE: &str = "path.conf";

/// Locates the directory holding the reference files.
///
/// The directory is, in order of precedence: the `--data-dir` override, the path stored
/// by `gammalib data set-path`, or the OS-specific default data directory.
#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => path.to_path_buf(),
            None => Self::determine_data_path()?,
        };
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolves `path` against the data directory unless it is already absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let text = path.to_str().ok_or_else(|| {
            CliError::Argument(format!("Data path is not valid UTF-8: {}", path.display()))
        })?;

        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, text).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => match read_path_config(&config_path)? {
                Some(path) => Ok(path),
                None => {
                    warn!("Custom path config file is empty, falling back to default path.");
                    Self::get_default_data_path()
                }
            },
            _ => Self::get_default_data_path(),
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "gammalib", "gammalib")
    }

    fn get_path_config_file() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(PATH_CONFIG_FILE))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}

fn read_path_config(config_path: &Path) -> Result<Option<PathBuf>> {
    let custom_path = fs::read_to_string(config_path)?.trim().to_string();
    Ok((!custom_path.is_empty()).then(|| PathBuf::from(custom_path)))
}
