//! Wallet session domain model.

use serde::{Deserialize, Serialize};

use crate::entry::Address;

/// Authorization state of the wallet session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum SessionStatus {
    Disconnected,
    Connected(Address),
}

/// The wallet session.
///
/// Starts disconnected and becomes connected once the signing agent approves.
/// There is no way back to `Disconnected` within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub status: SessionStatus,
}

impl Session {
    /// Creates a disconnected session.
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Disconnected,
        }
    }

    /// Creates a session that is already connected as `address`.
    pub fn connected(address: Address) -> Self {
        Self {
            status: SessionStatus::Connected(address),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.status, SessionStatus::Connected(_))
    }

    /// Returns the connected address, if any.
    pub fn address(&self) -> Option<&Address> {
        match &self.status {
            SessionStatus::Connected(address) => Some(address),
            SessionStatus::Disconnected => None,
        }
    }

    /// Moves a disconnected session to `Connected(address)`.
    ///
    /// # Returns
    ///
    /// `true` if this call made the transition, `false` if the session was
    /// already connected (in which case it is left untouched).
    pub fn connect(&mut self, address: Address) -> bool {
        if self.is_connected() {
            return false;
        }
        self.status = SessionStatus::Connected(address);
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
