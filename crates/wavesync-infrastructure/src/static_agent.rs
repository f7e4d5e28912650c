//! Signing agent with a fixed account and scripted user responses.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use wavesync_core::entry::Address;
use wavesync_core::session::{AgentError, SigningAgent};

/// How the simulated user answers authorization prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentResponse {
    Approve,
    Reject,
    /// Behaves as if no agent were installed.
    Absent,
}

/// Signing agent that always holds the same account.
#[derive(Debug)]
pub struct StaticSigningAgent {
    account: Address,
    response: AgentResponse,
    authorized: AtomicBool,
    prompts: AtomicUsize,
}

impl StaticSigningAgent {
    pub fn new(account: Address, response: AgentResponse) -> Self {
        Self {
            account,
            response,
            authorized: AtomicBool::new(false),
            prompts: AtomicUsize::new(0),
        }
    }

    /// Marks the account as authorized already, as after an earlier visit.
    pub fn pre_authorized(self) -> Self {
        self.authorized.store(true, Ordering::SeqCst);
        self
    }

    pub fn account(&self) -> &Address {
        &self.account
    }

    /// Number of times the user was prompted.
    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SigningAgent for StaticSigningAgent {
    async fn authorized_identity(&self) -> Result<Option<Address>, AgentError> {
        if self.response == AgentResponse::Absent {
            return Err(AgentError::Unavailable("make sure you have a wallet installed".into()));
        }
        Ok(self
            .authorized
            .load(Ordering::SeqCst)
            .then(|| self.account.clone()))
    }

    async fn request_authorization(&self) -> Result<Address, AgentError> {
        match self.response {
            AgentResponse::Absent => {
                Err(AgentError::Unavailable("make sure you have a wallet installed".into()))
            }
            AgentResponse::Reject => {
                self.prompts.fetch_add(1, Ordering::SeqCst);
                Err(AgentError::Rejected("user rejected the request".into()))
            }
            AgentResponse::Approve => {
                self.prompts.fetch_add(1, Ordering::SeqCst);
                self.authorized.store(true, Ordering::SeqCst);
                Ok(self.account.clone())
            }
        }
    }
}
