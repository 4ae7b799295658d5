use super::{DataOptions, open_reference_data};
use crate::cli::ElementArgs;
use crate::error::Result;
use gammalib::engine::error::EngineError;
use tracing::info;

pub fn run(args: ElementArgs, options: DataOptions<'_>) -> Result<()> {
    let data = open_reference_data(options)?;
    let elements = data
        .elements()
        .select(args.z, args.symbol.as_deref(), args.name.as_deref())
        .map_err(EngineError::from)?;

    info!("{} element(s) selected", elements.len());
    if elements.is_empty() {
        println!("No matching element.");
    }
    for element in elements {
        println!("{}", element);
    }
    Ok(())
}
