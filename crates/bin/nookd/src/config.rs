//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `nook.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use nook_adapter_lock::LockConfig;
use nook_adapter_vacuum::VacuumConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Hub scheduling settings.
    pub hub: HubConfig,
    /// Per-integration settings.
    pub integrations: IntegrationsConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Hub scheduling configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Seconds between authoritative polls (and not-ready setup retries).
    pub poll_interval_secs: u64,
}

/// Per-integration settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    pub vacuum: VacuumSection,
    pub lock: LockSection,
}

/// Vacuum integration toggle plus its settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VacuumSection {
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: VacuumConfig,
}

/// Lock integration toggle plus its settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LockSection {
    pub enabled: bool,
    /// Display name for the lock.
    pub name: String,
    #[serde(flatten)]
    pub settings: LockConfig,
}

impl Config {
    /// Load configuration from `nook.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("nook.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NOOK_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("NOOK_POLL_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.hub.poll_interval_secs = secs;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        if self.integrations.vacuum.enabled
            && self.integrations.vacuum.settings.connect_timeout_secs == 0
        {
            return Err(ConfigError::Validation(
                "vacuum connect timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "nookd=info,nook=info".to_string(),
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
        }
    }
}

impl Default for VacuumSection {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: VacuumConfig::default(),
        }
    }
}

impl Default for LockSection {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "Front Door".to_string(),
            settings: LockConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
