pub mod data;
pub mod element;
pub mod gamma;
pub mod identify;
pub mod libraries;
pub mod nuclide;

use crate::config;
use crate::data::DataManager;
use crate::error::Result;
use gammalib::core::measured::MeasuredValue;
use gammalib::core::models::gamma::GammaLine;
use gammalib::engine::context::ReferenceData;
use std::path::Path;
use tracing::info;

/// Options shared by every command that reads the reference data.
#[derive(Debug, Clone, Copy)]
pub struct DataOptions<'a> {
    pub config: Option<&'a Path>,
    pub data_dir: Option<&'a Path>,
}

pub fn open_reference_data(options: DataOptions<'_>) -> Result<ReferenceData> {
    let data_manager = DataManager::new(options.data_dir)?;
    info!("Using data directory {:?}", data_manager.get_data_path());
    let config = config::load(options.config, &data_manager)?;
    Ok(ReferenceData::load(&config)?)
}

pub(crate) const LINE_HEADER: &str = "ID                   Energy (keV)     Sigma (b)   Intensity (%)";

fn percent(value: MeasuredValue) -> String {
    (value * 100.0).to_string()
}

/// One table row per gamma line, aligned with [`LINE_HEADER`].
pub(crate) fn line_row(line: &GammaLine) -> String {
    let sigma = line.sigma().map(|s| s.to_string()).unwrap_or_default();
    let intensity = line.intensity().map(percent).unwrap_or_default();
    format!(
        "{:<20} {:>13} {:>13} {:>15}",
        line.id(),
        line.energy().to_string(),
        sigma,
        intensity
    )
}
