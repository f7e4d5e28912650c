//! Infrastructure for Wavesync: concrete collaborators and configuration storage.

pub mod config_service;
pub mod memory_ledger;
pub mod paths;
pub mod static_agent;

pub use crate::config_service::ConfigService;
pub use crate::memory_ledger::InMemoryLedger;
pub use crate::paths::WavesyncPaths;
pub use crate::static_agent::{AgentResponse, StaticSigningAgent};
