//! Configuration management for rxverify.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. The browser execution mode is the
//! one knob every deployment must get right, so it is also settable
//! through `RXVERIFY_BROWSER_MODE` and rejected eagerly when unrecognized.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable selecting the browser execution mode.
pub const BROWSER_MODE_ENV: &str = "RXVERIFY_BROWSER_MODE";

/// How the verification browser is launched.
///
/// Exactly three modes are recognized; anything else is a startup-time
/// configuration error, never a per-candidate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Headless Chrome from the system `google-chrome-stable` binary.
    Container,
    /// Like `Container`, plus `--no-sandbox` for unprivileged containers.
    Devcontainer,
    /// Headful Chrome with default executable discovery, for local debugging.
    Local,
}

impl ExecutionMode {
    /// Read the execution mode from `RXVERIFY_BROWSER_MODE`, if set.
    ///
    /// Returns `Ok(None)` when the variable is absent so the caller can fall
    /// back to the configured value.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` when the variable is set to
    /// anything but the three recognized modes.
    pub fn from_env() -> ConfigResult<Option<Self>> {
        match std::env::var(BROWSER_MODE_ENV) {
            Ok(value) => value.parse().map(Some),
            Err(_) => Ok(None),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "container" => Ok(Self::Container),
            "devcontainer" => Ok(Self::Devcontainer),
            "local" => Ok(Self::Local),
            other => Err(ConfigError::InvalidValue {
                field: "browser.mode".to_string(),
                reason: format!(
                    "expected 'container', 'devcontainer' or 'local', got '{other}'"
                ),
            }),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(f, "container"),
            Self::Devcontainer => write!(f, "devcontainer"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Main application configuration.
///
/// Loaded from `~/.config/rxverify/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Browser automation settings
    pub browser: BrowserRunConfig,
    /// Verification pipeline settings
    pub verification: VerificationConfig,
    /// Database settings
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined, the file
    /// exists but cannot be read, or its contents are not valid TOML.
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &std::path::Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides applied.
    ///
    /// Supports `RXVERIFY_BROWSER_MODE` for the browser execution mode.
    /// An unrecognized value fails here, before any batch work starts.
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env()?;
        Ok(config)
    }

    /// Apply environment overrides to an already-loaded configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for an unrecognized mode.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        if let Some(mode) = ExecutionMode::from_env()? {
            tracing::debug!("Override browser.mode from env: {}", mode);
            self.browser.mode = mode;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/rxverify/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "rxverify", "rxverify").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/rxverify`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "rxverify", "rxverify").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserRunConfig {
    /// Execution mode: `container`, `devcontainer` or `local`
    pub mode: ExecutionMode,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
}

impl Default for BrowserRunConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Container,
            navigation_timeout_secs: 30,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

/// Verification pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Hard cap on one strategy invocation, in seconds
    pub strategy_timeout_secs: u64,
    /// How long to wait for a registry search to render results, in seconds
    pub results_timeout_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            strategy_timeout_secs: 90,
            results_timeout_secs: 15,
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "rxverify.db".to_string(),
            max_connections: 5,
        }
    }
}
