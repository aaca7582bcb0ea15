use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(verbose: bool) -> EnvFilter {
    let default_filter = if verbose {
        "repo_search=debug"
    } else {
        "repo_search=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
}

/// Installs the global subscriber writing to stderr, so stdout carries only search
/// output.
pub fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Installs the global subscriber appending to `path`. Used while the terminal UI
/// owns the screen.
pub fn init_file_tracing(verbose: bool, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
