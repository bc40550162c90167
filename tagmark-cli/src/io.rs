//! File I/O and log setup for the terminal app

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Read a text file to submit for annotation
pub fn load_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Get the ~/.tagmark directory path, creating it if needed
pub fn tagmark_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let tagmark_dir = home.join(".tagmark");

    if !tagmark_dir.exists() {
        fs::create_dir_all(&tagmark_dir)
            .with_context(|| format!("Failed to create {}", tagmark_dir.display()))?;
    }

    Ok(tagmark_dir)
}

/// Send tracing output to `<dir>/tagmark.log`; the terminal belongs to the UI.
///
/// `TAGMARK_LOG` takes precedence over `default_filter`.
pub fn init_logging(dir: &Path, default_filter: &str) -> Result<PathBuf> {
    let log_path = dir.join("tagmark.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter =
        EnvFilter::try_from_env("TAGMARK_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(log_path)
}
