use crate::error::{CliError, Result};
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, prelude::*, registry::LookupSpan};

/// `-q` silences everything; otherwise each `-v` lowers the threshold by one level from WARN.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
}

/// Plain-text records with thread ids and targets, so parallel library scans can be told apart.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
}

/// Installs the global subscriber: console output on stderr plus an optional log file.
///
/// # Errors
///
/// Returns `CliError::Io` if the log file cannot be created.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let file = log_file.map(File::create).transpose().map_err(CliError::Io)?;

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(console_layer())
        .with(file.map(file_layer))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::{debug, info, info_span, trace};

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(5, false), LevelFilter::TRACE);
        assert_eq!(level_filter(2, true), LevelFilter::OFF);
    }

    #[test]
    #[serial]
    fn file_layer_writes_plain_records_with_spans() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("gammalib.log");

        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::DEBUG)
            .with(file_layer(File::create(&log_path).unwrap()));

        tracing::subscriber::with_default(subscriber, || {
            let _span = info_span!("identify_workflow").entered();
            debug!("Opened gamma library 'decay'");
            trace!("Filtering 5 lines");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Opened gamma library 'decay'"));
        assert!(content.contains("identify_workflow"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
        assert!(!content.contains("Filtering 5 lines"));
        assert!(!content.contains('\u{1b}'));
    }

    #[test]
    #[serial]
    fn quiet_filter_drops_records() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("quiet.log");

        let subscriber = tracing_subscriber::registry()
            .with(level_filter(3, true))
            .with(file_layer(File::create(&log_path).unwrap()));

        tracing::subscriber::with_default(subscriber, || {
            info!("Loaded 118 elements");
        });

        assert!(std::fs::read_to_string(log_path).unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(temp_dir.path()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
