//! Application layer for Wavesync.
//!
//! This crate provides the services that coordinate the wallet session, the
//! ledger and the wave log, plus the `WavePortal` facade the UI drives.

pub mod portal;
pub mod session_manager;
pub mod status;
pub mod sync_controller;
pub mod transaction_tracker;

#[cfg(test)]
mod test_support;

pub use portal::{PortalSnapshot, WavePortal};
pub use session_manager::{ConnectionObserver, SessionManager};
pub use status::StatusBoard;
pub use sync_controller::{SyncController, SyncReport};
pub use transaction_tracker::TransactionTracker;
