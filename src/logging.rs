use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".digital-library-manager";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "library.log";

/// Install the global tracing subscriber, writing events to a log file in
/// the user's home directory. The terminal stays reserved for the UI, so
/// nothing is ever emitted to stdout or stderr. Returns the log path so the
/// caller can mention it when something goes wrong later.
///
/// The filter honors `RUST_LOG` and falls back to `info`.
pub fn init() -> Result<PathBuf> {
    let log_path = log_path()?;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let file = File::create(&log_path).context("failed to create log file")?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();

    Ok(log_path)
}

/// Resolve the absolute path to the log file inside the user's home.
fn log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
