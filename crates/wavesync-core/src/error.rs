//! Error types for the Wavesync core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::session::AgentError;

/// Why a wave submission was refused before it reached the mining window.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum SubmitRejection {
    /// No wallet session is connected.
    #[error("wallet is not connected")]
    NotConnected,

    /// The message was empty or whitespace only.
    #[error("message is empty")]
    EmptyMessage,

    /// Another wave is still waiting for its outcome.
    #[error("a transaction is already in progress")]
    TransactionInProgress,

    /// The ledger (or the agent signing for it) refused the append call.
    #[error("{0}")]
    Ledger(String),
}

/// A shared error type for the entire Wavesync core.
///
/// Every variant is recoverable: callers update their state, surface the
/// message to the user and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveError {
    /// No signing agent is present.
    #[error("Signing agent unavailable: {0}")]
    AgentUnavailable(String),

    /// The user declined the authorization request.
    #[error("Authorization rejected: {0}")]
    AuthorizationRejected(String),

    /// The bulk read of all waves failed.
    #[error("Failed to read waves: {0}")]
    ReadFailed(String),

    /// The live wave feed could not be opened.
    #[error("Failed to subscribe to new waves: {0}")]
    SubscribeFailed(String),

    /// The wave never entered the mining window.
    #[error("Wave rejected: {0}")]
    SubmitRejected(SubmitRejection),

    /// The wave was mined but the ledger reported a failure (or it timed out).
    #[error("Wave failed to confirm: {0}")]
    ConfirmationFailed(String),

    /// A raw ledger record could not be turned into an entry.
    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WaveError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a SubmitRejected error
    pub fn rejected(reason: SubmitRejection) -> Self {
        Self::SubmitRejected(reason)
    }

    /// Creates a MalformedEntry error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedEntry(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Maps a failed agent call made while connecting.
    pub fn from_agent(err: AgentError) -> Self {
        match err {
            AgentError::Unavailable(message) => Self::AgentUnavailable(message),
            AgentError::Rejected(message) => Self::AuthorizationRejected(message),
        }
    }

    /// Maps a failed `read_all` call.
    pub fn read_failed(err: LedgerError) -> Self {
        Self::ReadFailed(err.to_string())
    }

    /// Maps a failed `subscribe` call.
    pub fn subscribe_failed(err: LedgerError) -> Self {
        Self::SubscribeFailed(err.to_string())
    }

    /// Maps a failed `append` call.
    pub fn append_failed(err: LedgerError) -> Self {
        Self::SubmitRejected(SubmitRejection::Ledger(err.to_string()))
    }

    /// Maps a failed finalization of a write that was already mining.
    pub fn confirmation_failed(err: LedgerError) -> Self {
        Self::ConfirmationFailed(err.to_string())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from the signing agent during connection
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AgentUnavailable(_) | Self::AuthorizationRejected(_)
        )
    }

    /// Check if this is a submit rejection of any kind
    pub fn is_submit_rejected(&self) -> bool {
        matches!(self, Self::SubmitRejected(_))
    }

    /// Check if this is the specific submit rejection given
    pub fn is_rejection(&self, reason: &SubmitRejection) -> bool {
        matches!(self, Self::SubmitRejected(r) if r == reason)
    }

    /// Check if this is a confirmation failure
    pub fn is_confirmation_failed(&self) -> bool {
        matches!(self, Self::ConfirmationFailed(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for WaveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for WaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for WaveError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for WaveError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, WaveError>`.
pub type Result<T> = std::result::Result<T, WaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_errors_map_to_taxonomy() {
        let unavailable = WaveError::from_agent(AgentError::Unavailable("no wallet".into()));
        assert_eq!(unavailable, WaveError::AgentUnavailable("no wallet".into()));
        assert!(unavailable.is_authorization());

        let rejected = WaveError::from_agent(AgentError::Rejected("denied".into()));
        assert_eq!(rejected, WaveError::AuthorizationRejected("denied".into()));
    }

    #[test]
    fn test_ledger_errors_map_by_operation() {
        let err = LedgerError::Network("timeout".into());

        assert!(matches!(
            WaveError::read_failed(err.clone()),
            WaveError::ReadFailed(_)
        ));
        assert!(matches!(
            WaveError::subscribe_failed(err.clone()),
            WaveError::SubscribeFailed(_)
        ));
        assert!(WaveError::append_failed(err.clone()).is_submit_rejected());
        assert!(WaveError::confirmation_failed(err).is_confirmation_failed());
    }

    #[test]
    fn test_submit_rejection_display() {
        let err = WaveError::rejected(SubmitRejection::NotConnected);
        assert_eq!(err.to_string(), "Wave rejected: wallet is not connected");
        assert!(err.is_rejection(&SubmitRejection::NotConnected));
        assert!(!err.is_rejection(&SubmitRejection::EmptyMessage));
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: WaveError = io.into();
        assert!(err.to_string().contains("NotFound"));
    }
}
