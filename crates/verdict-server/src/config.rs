//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Batch execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Maximum number of batch items executed concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-item deadline in milliseconds; no deadline when unset
    #[serde(default)]
    pub item_timeout_ms: Option<u64>,
}

fn default_concurrency() -> usize {
    8
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            item_timeout_ms: None,
        }
    }
}

/// Catalog settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Directory to preload the catalog from; empty catalog when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Log level
    pub log_level: String,

    /// Catalog preload settings
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Batch execution settings
    #[serde(default)]
    pub batch: BatchSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            catalog: CatalogSettings::default(),
            batch: BatchSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("VERDICT").separator("__"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(_) => {
                tracing::info!("No config file found, using default configuration");
                Ok(Self::default())
            }
        }
    }
}
