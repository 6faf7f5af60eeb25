//! Errors for the terminal shell around the engine.
//!
//! The simulation itself cannot fail; these cover startup and teardown.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;
