//! Process configuration read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MENU_PATH` | `menu.json` | JSON menu loaded at startup |
//! | `LOG_FILTER` | `info` | Tracing filter used when `RUST_LOG` is unset |
//! | `DEMO_DINERS` | `8` | Concurrent diners simulated by the demo binary |
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MENU_PATH: &str = "menu.json";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_DEMO_DINERS: usize = 8;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub menu_path: PathBuf,
    pub log_filter: String,
    pub demo_diners: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu_path: PathBuf::from(DEFAULT_MENU_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            demo_diners: DEFAULT_DEMO_DINERS,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] if `DEMO_DINERS` is set but is not a
    /// non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let demo_diners = match lookup("DEMO_DINERS") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "DEMO_DINERS",
                    value,
                })?,
            None => defaults.demo_diners,
        };

        Ok(Self {
            menu_path: lookup("MENU_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.menu_path),
            log_filter: lookup("LOG_FILTER").unwrap_or(defaults.log_filter),
            demo_diners,
        })
    }

    pub fn with_menu_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.menu_path = path.into();
        self
    }
}
