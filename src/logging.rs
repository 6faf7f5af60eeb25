//! File-backed `tracing` setup. The terminal belongs to the TUI, so nothing
//! is ever written to stdout or stderr once the game is running.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub fn init(config: &Config) -> AppResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| AppError::Logging {
            message: e.to_string(),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Logging {
            message: e.to_string(),
        })
}
