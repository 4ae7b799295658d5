use super::{DataOptions, open_reference_data};
use crate::cli::NuclideArgs;
use crate::error::Result;
use tracing::info;

pub fn run(args: NuclideArgs, options: DataOptions<'_>) -> Result<()> {
    let data = open_reference_data(options)?;
    let nuclides = data.nuclides().find(
        args.z,
        args.a,
        args.symbol.as_deref(),
        args.name.as_deref(),
    );

    info!("{} nuclide(s) found", nuclides.len());
    if nuclides.is_empty() {
        println!("No matching nuclide.");
    }
    for nuclide in nuclides {
        println!("{}", nuclide);
    }
    Ok(())
}
