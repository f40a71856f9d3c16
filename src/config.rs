//! Configuration management for the `helmwatch` dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::HelmwatchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `helmwatch` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HelmwatchConfig {
    /// Status/log service configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Weather location and endpoint configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Polling cadence configuration
    #[serde(default)]
    pub poll: PollConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Status/log service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the helmet-detection backend
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Weather location settings (the hardware site)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Latitude of the monitored installation
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Longitude of the monitored installation
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// IANA timezone passed to the forecast API
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Poll interval settings, per widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Server/hardware status pills
    #[serde(default = "default_status_interval")]
    pub status_seconds: u64,
    /// Log table refresh
    #[serde(default = "default_logs_interval")]
    pub logs_seconds: u64,
    /// Weather widget refresh
    #[serde(default = "default_weather_interval")]
    pub weather_seconds: u64,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Weather response TTL in seconds (staleness window)
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path (stdout is owned by the alternate screen)
    #[serde(default = "default_log_file_path")]
    pub file_path: String,
}

// Default value functions
fn default_api_base_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_latitude() -> f64 {
    13.73
}

fn default_longitude() -> f64 {
    100.75
}

fn default_timezone() -> String {
    "Asia/Bangkok".to_string()
}

fn default_status_interval() -> u64 {
    5
}

fn default_logs_interval() -> u64 {
    3
}

fn default_weather_interval() -> u64 {
    60
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_cache_location() -> String {
    "~/.cache/helmwatch".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_path() -> String {
    "~/.cache/helmwatch/helmwatch.log".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            status_seconds: default_status_interval(),
            logs_seconds: default_logs_interval(),
            weather_seconds: default_weather_interval(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file_path(),
        }
    }
}

impl HelmwatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. HELMWATCH_API__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("HELMWATCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: HelmwatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("helmwatch").join("config.toml"))
    }

    /// Resolve the cache directory, expanding a leading `~`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        expand_home(&self.cache.location)
    }

    /// Resolve the log file path, expanding a leading `~`
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        expand_home(&self.logging.file_path)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(HelmwatchError::config("API base URL cannot be empty").into());
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(HelmwatchError::config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                self.api.base_url
            ))
            .into());
        }
        if self.api.timeout_seconds == 0 || self.api.timeout_seconds > 300 {
            return Err(HelmwatchError::config(
                "Request timeout must be between 1 and 300 seconds",
            )
            .into());
        }
        if self.api.max_retries > 10 {
            return Err(HelmwatchError::config("Retry count must be at most 10").into());
        }
        if !(-90.0..=90.0).contains(&self.weather.latitude) {
            return Err(HelmwatchError::config(format!(
                "Latitude must be within [-90, 90], got {}",
                self.weather.latitude
            ))
            .into());
        }
        if !(-180.0..=180.0).contains(&self.weather.longitude) {
            return Err(HelmwatchError::config(format!(
                "Longitude must be within [-180, 180], got {}",
                self.weather.longitude
            ))
            .into());
        }
        if self.poll.status_seconds == 0 || self.poll.logs_seconds == 0 || self.poll.weather_seconds == 0
        {
            return Err(HelmwatchError::config("Poll intervals must be non-zero").into());
        }
        Ok(())
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = HelmwatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weather.latitude, 13.73);
        assert_eq!(config.weather.longitude, 100.75);
        assert_eq!(config.weather.timezone, "Asia/Bangkok");
        assert_eq!(config.poll.status_seconds, 5);
        assert_eq!(config.poll.logs_seconds, 3);
        assert_eq!(config.poll.weather_seconds, 60);
        assert_eq!(config.cache.ttl_seconds, 60);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = HelmwatchConfig::default();
        config.api.base_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_coordinate_ranges() {
        let mut config = HelmwatchConfig::default();
        config.weather.latitude = 91.0;
        assert!(config.validate().is_err());

        config.weather.latitude = -45.0;
        config.weather.longitude = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = HelmwatchConfig::default();
        config.poll.logs_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            HelmwatchConfig::load_from_path(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("load should succeed without a file");
        assert_eq!(config.api.max_retries, 2);
    }
}
