use anyhow::{Context, Result};
use wavesync_core::config::PortalConfig;
use wavesync_infrastructure::ConfigService;

fn service() -> Result<ConfigService> {
    ConfigService::new().context("Failed to resolve config path")
}

/// Loads the configuration, reporting (not hiding) a malformed file.
pub fn load() -> Result<PortalConfig> {
    let service = service()?;
    service
        .load()
        .with_context(|| format!("Failed to load {}", service.path().display()))
}

pub fn show(config: &PortalConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", service()?.path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let service = service()?;
    if service.path().exists() {
        println!("Config already exists: {}", service.path().display());
        return Ok(());
    }
    service.save(&PortalConfig::default())?;
    println!("Wrote default config to {}", service.path().display());
    Ok(())
}
