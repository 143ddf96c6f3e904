use anyhow::{Context, Result};
use clap::Parser;
use clima::config::{load_settings, project_paths, Cli, Options};
use std::{
    fs::OpenOptions,
    path::Path,
    sync::Mutex,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level from `-v` count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// The terminal belongs to the dashboard, so logs go to a file.
fn init_logging(path: &Path, verbose: u8) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = project_paths();

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| paths.as_ref().map(|p| p.log_path.clone()));
    if let Some(path) = &log_path {
        // logging is optional
        if let Err(e) = init_logging(path, cli.verbose) {
            eprintln!("warning: logging disabled: {e:#}");
        }
    }

    let settings_path = cli
        .config
        .clone()
        .or_else(|| paths.as_ref().map(|p| p.settings_path.clone()));
    let settings = settings_path
        .as_deref()
        .map(load_settings)
        .unwrap_or_default();

    let opts = Options::resolve(&cli, &settings);
    tracing::info!(location = %opts.location, mouse = opts.mouse, "starting dashboard");

    clima::app::run(&opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }

    #[test]
    fn unopenable_log_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("clima.log");
        let err = init_logging(&path, 0).unwrap_err();
        assert!(format!("{err:#}").contains("opening log file"));
    }
}
