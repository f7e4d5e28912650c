//! Wallet session lifecycle.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

use wavesync_core::entry::Address;
use wavesync_core::error::{Result, WaveError};
use wavesync_core::session::{Session, SigningAgent};

/// Hook invoked when the session becomes connected.
#[async_trait]
pub trait ConnectionObserver: Send + Sync {
    async fn on_session_connected(&self, address: &Address);
}

/// Tracks wallet authorization and requests it from the signing agent.
///
/// `SessionManager` is responsible for:
/// - Probing the agent for an existing authorization on startup
/// - Prompting the agent when the user asks to connect
/// - Firing the connection hook exactly once per run
///
/// Failures never change the session; it stays `Disconnected`.
pub struct SessionManager {
    agent: Arc<dyn SigningAgent>,
    observer: Arc<dyn ConnectionObserver>,
    session: watch::Sender<Session>,
    /// Serializes connection attempts so the hook cannot fire twice.
    connect_lock: Mutex<()>,
}

impl SessionManager {
    /// Creates a disconnected `SessionManager`.
    ///
    /// # Arguments
    ///
    /// * `agent` - The signing agent to authorize through
    /// * `observer` - Notified once the session becomes connected
    pub fn new(agent: Arc<dyn SigningAgent>, observer: Arc<dyn ConnectionObserver>) -> Self {
        let (session, _) = watch::channel(Session::new());
        Self {
            agent,
            observer,
            session,
            connect_lock: Mutex::new(()),
        }
    }

    /// Returns a copy of the current session.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Returns the connected address, if any.
    pub fn address(&self) -> Option<Address> {
        self.session.borrow().address().cloned()
    }

    /// Returns a receiver that observes session transitions.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Asks the agent for an already authorized identity without prompting.
    ///
    /// # Returns
    ///
    /// `Some(address)` if the agent has one (or the session is already
    /// connected), `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `WaveError::AgentUnavailable` if the agent cannot be queried.
    pub async fn check_existing_authorization(&self) -> Result<Option<Address>> {
        let _guard = self.connect_lock.lock().await;

        if let Some(address) = self.address() {
            return Ok(Some(address));
        }

        let identity = self
            .agent
            .authorized_identity()
            .await
            .map_err(WaveError::from_agent)?;

        match identity {
            Some(address) => {
                tracing::info!("[SessionManager] Found an authorized account: {}", address);
                self.mark_connected(address.clone()).await;
                Ok(Some(address))
            }
            None => {
                tracing::info!("[SessionManager] No authorized account found");
                Ok(None)
            }
        }
    }

    /// Prompts the agent for authorization.
    ///
    /// Calling this while already connected is a no-op that returns the
    /// current address.
    ///
    /// # Errors
    ///
    /// Returns `WaveError::AuthorizationRejected` if the user declines, or
    /// `WaveError::AgentUnavailable` if there is no agent.
    pub async fn request_connection(&self) -> Result<Address> {
        let _guard = self.connect_lock.lock().await;

        if let Some(address) = self.address() {
            tracing::debug!("[SessionManager] Already connected as {}", address);
            return Ok(address);
        }

        let address = self
            .agent
            .request_authorization()
            .await
            .map_err(WaveError::from_agent)?;

        tracing::info!("[SessionManager] Connected: {}", address);
        self.mark_connected(address.clone()).await;
        Ok(address)
    }

    async fn mark_connected(&self, address: Address) {
        let transitioned = self
            .session
            .send_if_modified(|session| session.connect(address.clone()));

        if transitioned {
            self.observer.on_session_connected(&address).await;
        }
    }
}
