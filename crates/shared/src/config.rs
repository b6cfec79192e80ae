//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Price calculation service configuration.
    pub calculation: CalculationServiceConfig,
    /// SKU-family / seller metadata service configuration.
    pub metadata: MetadataServiceConfig,
}

/// Price calculation service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationServiceConfig {
    /// Base URL of the calculation service.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Metadata lookup service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataServiceConfig {
    /// Base URL of the metadata service.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LISTRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
