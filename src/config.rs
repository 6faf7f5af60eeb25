//! Runtime settings loaded from `invaders.toml`.
//!
//! The file sits next to the executable unless `INVADERS_CONFIG` points
//! elsewhere. Every key is optional; missing keys keep their defaults. Game
//! rules are not configurable here, only the shell around them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "INVADERS_CONFIG";
const CONFIG_FILE: &str = "invaders.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visual frame period. 16 ms is roughly 60 FPS.
    pub tick_rate_ms: u64,
    /// How long a movement key counts as held after its last press or
    /// repeat, for terminals that never report key releases.
    pub hold_window_ms: u64,
    pub log_file: PathBuf,
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16,
            hold_window_ms: 150,
            log_file: PathBuf::from("invaders.log"),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(CONFIG_FILE);
            }
        }
        PathBuf::from(CONFIG_FILE)
    }

    /// A missing file is not an error: defaults apply.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        config.tick_rate_ms = config.tick_rate_ms.max(1);
        Ok(config)
    }
}
