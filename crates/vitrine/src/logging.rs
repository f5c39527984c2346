//! File logging; the terminal itself is taken by the UI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter, e.g. `VITRINE_LOG=debug`.
const LOG_ENV: &str = "VITRINE_LOG";

/// Install a subscriber appending to `path`.
pub fn init(path: &Path) -> color_eyre::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
