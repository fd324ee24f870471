//! Verdict Rules Engine HTTP Server
//!
//! Serves the REST API for rule execution, decision tables, workflows
//! and catalog administration.

pub mod api;
pub mod config;
pub mod error;

use crate::config::ServerConfig;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verdict_catalog::{Catalog, CatalogSource, FileSystemCatalog};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing()?;

    // Load configuration
    let config = ServerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    // Initialize the catalog, preloading from disk when configured
    let catalog = init_catalog(&config).await?;
    info!("Catalog initialized at version {}", catalog.snapshot().version);

    let app = api::create_router(Arc::new(catalog), config.batch.clone());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Execute API: http://{}/v1/rules/execute", addr);
    info!("  Batch API: http://{}/v1/rules/batch", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "verdict_server=info,verdict_engine=info,verdict_catalog=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Initialize the catalog
async fn init_catalog(config: &ServerConfig) -> Result<Catalog> {
    match &config.catalog.path {
        Some(path) => {
            let loader = FileSystemCatalog::new(path)?;
            let catalog = Catalog::new();
            let count = loader.load_into(&catalog).await?;
            info!("Loaded {} catalog artifacts from {}", count, path.display());
            Ok(catalog)
        }
        None => Ok(Catalog::new()),
    }
}
