//! File logging.
//!
//! The terminal belongs to the editor, so log records go to a file in the
//! system temp directory. Nothing is installed unless the user asks for it.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use rand::distr::Alphanumeric;
use rand::Rng;
use tracing_subscriber::EnvFilter;

/// Length of the random part of the log file name.
const SUFFIX_LEN: usize = 8;

/// Builds a fresh log file path such as `/tmp/tailorbird-a8Kq02Zx.log`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    dir.join(format!("tailorbird-{}.log", suffix))
}

/// Installs a tracing subscriber writing to a new file under `dir`.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
/// Returns the path of the log file.
pub fn init_file_logging(dir: &Path) -> Result<PathBuf> {
    let path = log_file_path(dir);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(path)
}
