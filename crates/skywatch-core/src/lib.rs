pub mod config;
pub mod error;

pub use config::{BoardConfig, Config, ProviderConfig};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize the core: tracing/logging setup.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    tracing::info!("Skywatch core initialized");
    Ok(())
}
