use super::{DataOptions, LINE_HEADER, line_row, open_reference_data};
use crate::cli::IdentifyArgs;
use crate::error::{CliError, Result};
use gammalib::workflows::identify;

pub fn run(args: IdentifyArgs, options: DataOptions<'_>) -> Result<()> {
    if !args.energy.is_finite() {
        return Err(CliError::Argument(format!("Invalid energy: {}", args.energy)));
    }
    if args.tolerance.is_some_and(|t| !t.is_finite() || t < 0.0) {
        return Err(CliError::Argument(
            "Tolerance must be a finite, non-negative number".to_string(),
        ));
    }

    let data = open_reference_data(options)?;
    if data.libraries().is_empty() {
        return Err(CliError::Config(
            "No gamma library is configured. Add [[library]] entries or place prompt.dat/decay.dat in the data directory.".to_string(),
        ));
    }

    let candidates = identify::run(&data, args.energy, args.tolerance)?;
    if candidates.is_empty() {
        println!("No gamma line near {} keV.", args.energy);
        return Ok(());
    }

    println!("{:>10}  {:<10} {}", "dE (keV)", "Library", LINE_HEADER);
    for candidate in &candidates {
        println!(
            "{:>10.3}  {:<10} {}",
            candidate.distance,
            candidate.library,
            line_row(&candidate.line)
        );
    }
    Ok(())
}
