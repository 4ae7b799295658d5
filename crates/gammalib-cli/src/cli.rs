use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "gammalib CLI - Look up elements, nuclides and gamma-ray lines, and identify peaks in measured spectra.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a database configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use this data directory instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up chemical elements.
    Element(ElementArgs),
    /// Look up nuclides.
    Nuclide(NuclideArgs),
    /// Search a gamma-line library.
    Gamma(GammaArgs),
    /// List candidate lines for a measured peak energy across all libraries.
    Identify(IdentifyArgs),
    /// List the configured gamma libraries and their queryable fields.
    Libraries,
    /// Manage the local data directory holding the reference files.
    Data(DataArgs),
}

/// Arguments for the `element` subcommand.
///
/// A symbol takes precedence over a name, which takes precedence over an atomic number.
/// Without any selector, every element is listed.
#[derive(Args, Debug)]
pub struct ElementArgs {
    /// Atomic number.
    #[arg(short, long, value_name = "Z")]
    pub z: Option<u32>,

    /// Element symbol (case-insensitive), e.g. 'Au'.
    #[arg(short, long, value_name = "SYMBOL")]
    pub symbol: Option<String>,

    /// Element name (case-insensitive), e.g. 'gold'.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the `nuclide` subcommand. All given criteria must match.
#[derive(Args, Debug)]
pub struct NuclideArgs {
    /// Atomic number.
    #[arg(short, long, value_name = "Z")]
    pub z: Option<u32>,

    /// Mass number.
    #[arg(short, long, value_name = "A")]
    pub a: Option<u32>,

    /// Element symbol (case-insensitive).
    #[arg(short, long, value_name = "SYMBOL")]
    pub symbol: Option<String>,

    /// Element name (case-insensitive).
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the `gamma` subcommand.
#[derive(Args, Debug)]
pub struct GammaArgs {
    /// Name of the gamma library to search (see `gammalib libraries`).
    #[arg(required = true, value_name = "LIBRARY")]
    pub library: String,

    /// Filters as FIELD=VALUE pairs, e.g. 'energy=1332' 'symbol=Co'.
    /// All filters must match. An empty VALUE disables the filter.
    #[arg(value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Maximum distance for fuzzy numeric fields. Defaults to the library's fuzziness.
    #[arg(short, long, value_name = "FLOAT")]
    pub fuzziness: Option<f64>,

    /// Sort the results by this field. Unknown values are listed last.
    #[arg(short, long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort in descending order.
    #[arg(short, long, requires = "sort")]
    pub reverse: bool,
}

/// Arguments for the `identify` subcommand.
#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Measured peak energy in keV.
    #[arg(required = true, value_name = "ENERGY")]
    pub energy: f64,

    /// Maximum distance in keV. Defaults to each library's fuzziness.
    #[arg(short, long, value_name = "KEV")]
    pub tolerance: Option<f64>,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The directory holding the reference files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn gamma_arguments_parse() {
        let cli = Cli::try_parse_from([
            "gammalib", "gamma", "decay", "energy=1332", "symbol=Co", "--sort", "intensity", "-r",
        ])
        .unwrap();
        match cli.command {
            Commands::Gamma(args) => {
                assert_eq!(args.library, "decay");
                assert_eq!(args.filters, vec!["energy=1332", "symbol=Co"]);
                assert_eq!(args.sort.as_deref(), Some("intensity"));
                assert!(args.reverse);
                assert!(args.fuzziness.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["gammalib", "identify", "1332.5", "-vv", "--data-dir", "/tmp/x"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn reverse_requires_sort() {
        assert!(Cli::try_parse_from(["gammalib", "gamma", "decay", "z=27", "--reverse"]).is_err());
    }
}
