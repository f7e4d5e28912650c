//! Domain layer for Wavesync.
//!
//! Models for wave entries, the wallet session and the user's wave write,
//! together with the collaborator traits (ledger, signing agent) the
//! application layer is built against.

pub mod config;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod session;
pub mod transaction;

// Re-export common error type
pub use error::{SubmitRejection, WaveError};
