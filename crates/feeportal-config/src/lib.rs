//! Configuration management for feeportal
//!
//! Loads the portal configuration from a YAML file. Every field has a
//! default, so an empty file (or no file at all) yields a working setup
//! pointed at a local payments backend.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Remote payments API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsApiConfig {
    /// Base URL, e.g. `http://localhost:5000/api/payments`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PaymentsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api/payments".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Fixed fields sent with every payment-creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDefaults {
    #[serde(default = "default_trustee_id")]
    pub trustee_id: String,
    #[serde(default = "default_gateway_name")]
    pub gateway_name: String,
    /// Where the gateway redirects the payer after checkout
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
}

impl Default for PaymentDefaults {
    fn default() -> Self {
        Self {
            trustee_id: default_trustee_id(),
            gateway_name: default_gateway_name(),
            callback_url: default_callback_url(),
        }
    }
}

fn default_trustee_id() -> String {
    "trustee123".to_string()
}

fn default_gateway_name() -> String {
    "edviron".to_string()
}

fn default_callback_url() -> String {
    "http://localhost:3000/payment-success".to_string()
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Rows per page when the request does not say
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Choices offered in the page-size select
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            page_size_options: default_page_size_options(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 25, 50]
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Debounce applied to the transactions search box
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Offset from UTC used when rendering payment times, in minutes
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            utc_offset_minutes: default_utc_offset_minutes(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_search_debounce_ms() -> u64 {
    400
}

fn default_utc_offset_minutes() -> i32 {
    330
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub payments_api: PaymentsApiConfig,
    #[serde(default)]
    pub payment: PaymentDefaults,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path.to_path_buf()) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document deserializes to unit, not to a mapping
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base = &self.payments_api.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "payments_api.base_url".to_string(),
                reason: format!("Expected an http(s) URL, got '{}'", base),
            });
        }

        if self.payments_api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "payments_api.timeout_secs".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.pagination.page_size_options.is_empty()
            || self.pagination.page_size_options.contains(&0)
        {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size_options".to_string(),
                reason: "Page sizes must be a non-empty list of positive numbers".to_string(),
            });
        }

        if self.pagination.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_limit".to_string(),
                reason: "Default limit must be greater than 0".to_string(),
            });
        }

        // chrono::FixedOffset accepts strictly less than a day
        if self.display.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::InvalidValue {
                field: "display.utc_offset_minutes".to_string(),
                reason: "Offset must be within +/- 23:59".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Unknown level '{}'", self.logging.level),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Listen address as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Page size to use for a requested limit; unknown sizes fall back to the default
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(limit) if self.pagination.page_size_options.contains(&limit) => limit,
            _ => self.pagination.default_limit,
        }
    }
}
