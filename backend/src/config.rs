//! Configuration management for the Kiosk Ledger server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with KIOSK_ prefix (`KIOSK_SERVER__PORT`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::CalcPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// `text` or `json`
    pub log_format: String,

    pub server: ServerConfig,

    pub storage: StorageConfig,

    /// Fee rates and special product ids used by the calculators
    #[serde(default)]
    pub policy: CalcPolicy,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Currency suffix used when formatting amounts
    pub currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Which persistence adapter to use
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Postgres if configured and reachable, else the local file
    Auto,
    Hosted,
    Local,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// PostgreSQL connection URL
    #[serde(default)]
    pub database_url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// JSON document used by the local adapter
    pub local_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// Products a card total can be split into, in enumeration order
    #[serde(default = "default_classifier_products")]
    pub product_ids: Vec<String>,
    /// Largest card total the classifier will enumerate
    #[serde(default = "default_classifier_max_amount")]
    pub max_amount: u32,
}

fn default_classifier_max_amount() -> u32 {
    shared::DEFAULT_MAX_CLASSIFIER_AMOUNT
}

fn default_classifier_products() -> Vec<String> {
    ["rocky", "kunafa", "normal", "cookies"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            product_ids: default_classifier_products(),
            max_amount: default_classifier_max_amount(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("KIOSK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("log_format", "text")?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "auto")?
            .set_default("storage.max_connections", 5)?
            .set_default("storage.min_connections", 1)?
            .set_default("storage.local_path", "data/kiosk-ledger.json")?
            .set_default("currency", "AED")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (KIOSK_ prefix)
            .add_source(
                Environment::with_prefix("KIOSK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Auto,
            database_url: None,
            max_connections: 5,
            min_connections: 1,
            local_path: "data/kiosk-ledger.json".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_format: "text".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            policy: CalcPolicy::default(),
            classifier: ClassifierConfig::default(),
            currency: "AED".to_string(),
        }
    }
}
