// EsoxSolutions.RandomPool - HTTP service
// Serves the pool manager over HTTP until Ctrl-C.
//
// Environment:
//   MAX_POOL_SIZE      capacity shared by every pool (default 536870912)
//   POOL_SERVICE_ADDR  listen address (default 0.0.0.0:8000)
//   RUST_LOG           log filter (default info)

use anyhow::Result;
use esox_randompool::{PoolConfiguration, PoolManager, service};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PoolConfiguration::from_env()?;
    let manager = Arc::new(PoolManager::with_builtin_types(&config)?);

    tracing::info!(
        max_pool_size = manager.max_pool_size(),
        types = ?manager.types().names(),
        "Starting random object pool service"
    );

    service::serve(&config, manager).await?;
    Ok(())
}
