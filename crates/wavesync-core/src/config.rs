//! Portal configuration model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ledger::AppendOptions;

/// Address of the wave contract the portal talks to by default.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xcd5e7263855a99d222A29E30f53Bb251026fAd0D";

const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 300;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PortalConfig {
    pub contract_address: String,
    /// Gas hint forwarded with every wave.
    pub gas_limit: Option<u64>,
    /// How long to wait for a wave to be mined. `0` waits indefinitely.
    pub confirmation_timeout_secs: u64,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            gas_limit: None,
            confirmation_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            log_level: "info".to_string(),
        }
    }
}

impl PortalConfig {
    pub fn append_options(&self) -> AppendOptions {
        AppendOptions {
            gas_limit: self.gas_limit,
        }
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        match self.confirmation_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.contract_address, DEFAULT_CONTRACT_ADDRESS);
        assert_eq!(config.confirmation_timeout(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: PortalConfig = toml::from_str(
            r#"
            gas_limit = 300000
            confirmation_timeout_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.append_options().gas_limit, Some(300_000));
        assert_eq!(config.confirmation_timeout(), None);
        assert_eq!(config.log_level, "info");
    }
}
