mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::commands::DataOptions;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("gammalib CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!("Setting Rayon global thread pool to {} threads.", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let options = DataOptions {
        config: cli.config.as_deref(),
        data_dir: cli.data_dir.as_deref(),
    };

    let command_result = match cli.command {
        Commands::Element(args) => {
            info!("Dispatching to 'element' command.");
            commands::element::run(args, options)
        }
        Commands::Nuclide(args) => {
            info!("Dispatching to 'nuclide' command.");
            commands::nuclide::run(args, options)
        }
        Commands::Gamma(args) => {
            info!("Dispatching to 'gamma' command.");
            commands::gamma::run(args, options)
        }
        Commands::Identify(args) => {
            info!("Dispatching to 'identify' command.");
            commands::identify::run(args, options)
        }
        Commands::Libraries => {
            info!("Dispatching to 'libraries' command.");
            commands::libraries::run(options)
        }
        Commands::Data(args) => {
            info!("Dispatching to 'data' command.");
            commands::data::run(args, options.data_dir)
        }
    };

    if let Err(e) = &command_result {
        error!("Command failed: {}", e);
    }
    command_result
}
