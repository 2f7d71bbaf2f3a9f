//! Configuration management for launchdash.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "launchdash";

/// Default dataset file, resolved relative to the working directory.
const DEFAULT_DATASET_FILE: &str = "spacex_launch_dash.csv";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Command-line overrides
/// 2. Environment variables (prefixed with `LAUNCHDASH_`)
/// 3. TOML config file at `~/.config/launchdash/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub dataset: DatasetConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Dashboard presentation configuration.
    pub dashboard: DashboardConfig,
}

/// Dataset-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the launch CSV.
    pub path: PathBuf,
}

/// Server-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

/// Dashboard presentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page heading.
    pub title: String,
    /// Granularity of the payload range control, in kilograms.
    pub slider_step_kg: f64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_FILE),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider_step_kg: 1000.0,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `LAUNCHDASH_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("LAUNCHDASH_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        if self.server.bind.parse::<IpAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!("server.bind is not an IP address: {}", self.server.bind),
            });
        }

        let step = self.dashboard.slider_step_kg;
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::ConfigValidation {
                message: format!("dashboard.slider_step_kg must be positive, got {step}"),
            });
        }

        if self.dashboard.title.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "dashboard.title must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the socket address the server should bind.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind` is not a valid IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.bind.parse().map_err(|_| Error::ConfigValidation {
            message: format!("server.bind is not an IP address: {}", self.server.bind),
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Get the dataset path.
    #[must_use]
    pub fn dataset_path(&self) -> &std::path::Path {
        &self.dataset.path
    }
}
