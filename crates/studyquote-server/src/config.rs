//! Configuration for the StudyQuote server.
//!
//! Configuration is read once at startup from `studyquote.json` (or an
//! explicit path), then overridden by `STUDYQUOTE_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::portal::Portal;

/// The default config file name.
const CONFIG_FILE_NAME: &str = "studyquote.json";

/// Environment variable overriding [`Config::host`].
pub const ENV_HOST: &str = "STUDYQUOTE_HOST";

/// Environment variable overriding [`Config::port`].
pub const ENV_PORT: &str = "STUDYQUOTE_PORT";

/// Environment variable overriding [`Config::portal`].
pub const ENV_PORTAL: &str = "STUDYQUOTE_PORTAL";

/// Default bind host.
fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default HTTP port.
const fn default_port() -> u16 {
    5050
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Interface the HTTP listener binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP listener binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Portal this deployment serves.
    #[serde(default)]
    pub portal: Portal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            portal: Portal::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory, then applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Io` if the working directory cannot be
    /// determined, or a config error if the file exists but is invalid or an
    /// override holds an invalid value.
    pub fn load() -> Result<Self> {
        Self::load_from_working_dir(std::env::current_dir())
    }

    fn load_from_working_dir(current_dir: std::io::Result<PathBuf>) -> Result<Self> {
        let mut config = Self::load_from_dir(&current_dir?)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Loads `studyquote.json` from `dir`, or defaults if absent.
    ///
    /// Environment overrides are not applied.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file path.
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::ConfigParseError` if the file cannot be read or
    /// contains invalid JSON, and `QuoteError::ConfigValidationError` if the
    /// values are invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(QuoteError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| QuoteError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `STUDYQUOTE_HOST`, `STUDYQUOTE_PORT` and `STUDYQUOTE_PORTAL`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup, then re-validates.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| {
                QuoteError::config_validation(
                    format!("{ENV_PORT} must be a port number, got '{port}'"),
                    format!("Set {ENV_PORT} to a value between 1 and 65535"),
                )
            })?;
        }

        if let Some(portal) = lookup(ENV_PORTAL) {
            self.portal = portal.parse().map_err(|e: String| {
                QuoteError::config_validation(e, format!("Set {ENV_PORTAL} to student, expert or admin"))
            })?;
        }

        self.validate()
    }

    /// Validates the configuration values.
    ///
    /// - `host` must not be empty
    /// - `port` must be greater than 0
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::ConfigValidationError` if any check fails.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(QuoteError::config_validation(
                "host must not be empty",
                "Set host to an interface address such as 127.0.0.1 in your studyquote.json",
            ));
        }

        if self.port == 0 {
            return Err(QuoteError::config_validation(
                "port must be greater than 0",
                "Set port to a value between 1 and 65535 in your studyquote.json",
            ));
        }

        Ok(())
    }

    /// Address string for the HTTP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
