use crate::cli::{DataArgs, DataCommands};
use crate::data::DataManager;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: DataArgs, data_dir: Option<&Path>) -> Result<()> {
    match args.command {
        DataCommands::Path => {
            handle_path(data_dir)?;
        }
        DataCommands::SetPath { path } => {
            handle_set_path(path)?;
        }
        DataCommands::ResetPath => {
            handle_reset_path()?;
        }
    }
    Ok(())
}

fn handle_path(data_dir: Option<&Path>) -> Result<()> {
    let manager = DataManager::new(data_dir)?;
    println!("{}", manager.get_data_path().display());
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    DataManager::set_custom_path(&path)?;
    info!("Data path set to {:?}", path);
    println!("Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    DataManager::reset_path()?;
    let manager = DataManager::new(None)?;
    info!("Data path reset to {:?}", manager.get_data_path());
    println!("Data path reset to: {}", manager.get_data_path().display());
    Ok(())
}
