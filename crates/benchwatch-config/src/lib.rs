//! Configuration loading for benchwatch dashboards.
//!
//! Settings come from three layers, later ones winning: built-in
//! defaults, a TOML file at the platform config path, and `BENCHWATCH_*`
//! environment variables (`__` separates nested keys, e.g.
//! `BENCHWATCH_REPLACE__INVENTORIES`). The merged [`Config`] translates
//! into the runtime [`DashboardConfig`] consumed by `benchwatch-core`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use benchwatch_core::{DashboardConfig, ReplacePolicies, ReplacePolicy};

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structure ────────────────────────────────────────────────

/// File and environment configuration, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Workbench server base URL.
    #[serde(default = "default_server")]
    pub server: String,

    /// Device and inventory poll cadence, in seconds. Must be greater
    /// than zero.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Flash notification lifetime, in seconds.
    #[serde(default = "default_flash_ttl_secs")]
    pub flash_ttl_secs: u64,

    /// HTTP request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fetch the simulator catalog at startup and show the panel.
    #[serde(default = "default_simulator")]
    pub simulator: bool,

    /// Per-entity replace behavior (`[replace]` table).
    #[serde(default)]
    pub replace: ReplaceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            poll_interval_secs: default_poll_interval_secs(),
            flash_ttl_secs: default_flash_ttl_secs(),
            timeout_secs: default_timeout_secs(),
            simulator: default_simulator(),
            replace: ReplaceConfig::default(),
        }
    }
}

fn default_server() -> String {
    "http://192.168.2.2:8090".to_owned()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_flash_ttl_secs() -> u64 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_simulator() -> bool {
    true
}

/// Replace policy per entity, as the strings `"always"` or
/// `"on-change"`. Validated during translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceConfig {
    #[serde(default = "policy_always")]
    pub plugged_devices: String,

    #[serde(default = "policy_on_change")]
    pub inventories: String,

    #[serde(default = "policy_always")]
    pub simulator: String,
}

impl Default for ReplaceConfig {
    fn default() -> Self {
        Self {
            plugged_devices: policy_always(),
            inventories: policy_on_change(),
            simulator: policy_always(),
        }
    }
}

fn policy_always() -> String {
    "always".to_owned()
}

fn policy_on_change() -> String {
    "on-change".to_owned()
}

// ── Paths ───────────────────────────────────────────────────────────

/// Platform config file path, e.g. `~/.config/benchwatch/config.toml`
/// on Linux.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "benchwatch", "benchwatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            PathBuf::from(std::env::var("HOME").unwrap_or_default())
                .join(".config/benchwatch/config.toml")
        })
}

// ── Loading and saving ──────────────────────────────────────────────

/// Load configuration from the canonical path, merged with environment
/// overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load configuration from an explicit file path. A missing file is not
/// an error; defaults and environment variables still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("BENCHWATCH_").split("__"));
    Ok(figment.extract()?)
}

/// Load the config, falling back to defaults when loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Write the config to the canonical path, creating parent directories
/// as needed.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

/// Write the config to an explicit path.
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = toml::to_string_pretty(config)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate and translate into the runtime configuration consumed by
    /// [`benchwatch_core::Dashboard`].
    pub fn to_dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        let url: url::Url = self.server.parse().map_err(|e| ConfigError::Validation {
            field: "server".to_owned(),
            reason: format!("invalid URL '{}': {e}", self.server),
        })?;

        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval_secs".to_owned(),
                reason: "must be greater than zero".to_owned(),
            });
        }

        let replace = ReplacePolicies {
            plugged_devices: parse_policy("replace.plugged_devices", &self.replace.plugged_devices)?,
            inventories: parse_policy("replace.inventories", &self.replace.inventories)?,
            simulator: parse_policy("replace.simulator", &self.replace.simulator)?,
        };

        Ok(DashboardConfig {
            url,
            timeout: Duration::from_secs(self.timeout_secs),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            flash_ttl: Duration::from_secs(self.flash_ttl_secs),
            simulator: self.simulator,
            replace,
        })
    }
}

fn parse_policy(field: &str, value: &str) -> Result<ReplacePolicy, ConfigError> {
    match value {
        "always" => Ok(ReplacePolicy::Always),
        "on-change" => Ok(ReplacePolicy::OnChange),
        other => Err(ConfigError::Validation {
            field: field.to_owned(),
            reason: format!("expected 'always' or 'on-change', got '{other}'"),
        }),
    }
}
