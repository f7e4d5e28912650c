use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub fn init(default_level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("Invalid log level '{}': {}", default_level, e))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow!("Failed to install JSON logger: {}", e))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow!("Failed to install logger: {}", e))
    }
}
