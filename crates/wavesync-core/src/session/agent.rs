//! Signing agent interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::entry::Address;

/// Failure reported by a signing agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// No agent is installed, or it cannot be reached.
    #[error("{0}")]
    Unavailable(String),

    /// The user declined the request.
    #[error("{0}")]
    Rejected(String),
}

/// Wallet-style agent that authorizes this client and signs on the user's behalf.
#[async_trait]
pub trait SigningAgent: Send + Sync {
    /// Returns an identity that is already authorized, without prompting the user.
    async fn authorized_identity(&self) -> Result<Option<Address>, AgentError>;

    /// Prompts the user to authorize this client.
    async fn request_authorization(&self) -> Result<Address, AgentError>;
}
