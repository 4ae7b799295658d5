use super::{DataOptions, LINE_HEADER, line_row, open_reference_data};
use crate::cli::GammaArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use gammalib::engine::error::EngineError;
use gammalib::engine::query::GammaQuery;
use tracing::info;

/// Turns the command-line arguments into a query.
pub fn build_query(args: &GammaArgs) -> Result<GammaQuery> {
    let mut query = GammaQuery::new();
    for filter in &args.filters {
        let (field, value) =
            parser::parse_filter(filter).map_err(|e| CliError::Argument(e.to_string()))?;
        query = query.filter(&field, value);
    }
    if let Some(fuzziness) = args.fuzziness {
        if !fuzziness.is_finite() || fuzziness < 0.0 {
            return Err(CliError::Argument(format!(
                "Fuzziness must be a finite, non-negative number, got {}",
                fuzziness
            )));
        }
        query = query.fuzziness(fuzziness);
    }
    if let Some(key) = &args.sort {
        query = query.sort_by(key).reverse(args.reverse);
    }
    Ok(query)
}

pub fn run(args: GammaArgs, options: DataOptions<'_>) -> Result<()> {
    let query = build_query(&args)?;
    let data = open_reference_data(options)?;
    let library = data.library(&args.library)?;

    let lines = library.query(&query).map_err(EngineError::from)?;
    info!("{} line(s) matched in '{}'", lines.len(), library.name());

    if lines.is_empty() {
        println!("No matching gamma line in '{}'.", library.name());
        return Ok(());
    }
    println!("{}", LINE_HEADER);
    for line in &lines {
        println!("{}", line_row(line));
    }
    Ok(())
}
