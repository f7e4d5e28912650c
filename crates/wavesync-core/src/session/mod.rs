//! Session domain module.
//!
//! This module contains the wallet session model and the signing agent
//! interface the session is authorized through.
//!
//! # Module Structure
//!
//! - `model`: Wallet session state (`Session`, `SessionStatus`)
//! - `agent`: Signing agent trait (`SigningAgent`, `AgentError`)
//!
//! # Usage
//!
//! ```ignore
//! use wavesync_core::session::{Session, SessionStatus, SigningAgent};
//! ```

mod agent;
mod model;

// Re-export public API
pub use agent::{AgentError, SigningAgent};
pub use model::{Session, SessionStatus};
