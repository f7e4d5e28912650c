//! The single entry point the UI talks to.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use wavesync_core::config::PortalConfig;
use wavesync_core::entry::{Address, Entry};
use wavesync_core::error::Result;
use wavesync_core::ledger::{LedgerClient, Receipt};
use wavesync_core::session::SigningAgent;
use wavesync_core::transaction::PendingTransaction;

use crate::session_manager::SessionManager;
use crate::status::StatusBoard;
use crate::sync_controller::SyncController;

/// Read-only view of everything the UI renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortalSnapshot {
    /// Connected wallet address, if any.
    pub account: Option<Address>,
    /// The reconciled wave log.
    pub entries: Vec<Entry>,
    /// The user's most recent wave write.
    pub transaction: Option<PendingTransaction>,
    /// Last wave count read from the ledger.
    pub total_waves: Option<u64>,
    /// Last displayable error.
    pub notice: Option<String>,
}

impl PortalSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Wires the session, the sync controller and the change feed together.
///
/// The UI only calls `start`, `connect`, `submit` and `shutdown`, and renders
/// `snapshot()` whenever `changes()` ticks.
pub struct WavePortal {
    session: SessionManager,
    sync: Arc<SyncController>,
    status: StatusBoard,
}

impl WavePortal {
    pub fn new(
        agent: Arc<dyn SigningAgent>,
        ledger: Arc<dyn LedgerClient>,
        config: &PortalConfig,
    ) -> Self {
        let status = StatusBoard::new();
        let sync = Arc::new(SyncController::new(ledger, config, status.clone()));
        let session = SessionManager::new(agent, sync.clone());

        tracing::info!(
            "[WavePortal] Using wave contract at {}",
            config.contract_address
        );

        Self {
            session,
            sync,
            status,
        }
    }

    /// Probes for an existing authorization, syncing right away if one is found.
    ///
    /// A failed probe is recorded as the notice and otherwise ignored.
    pub async fn start(&self) -> Option<Address> {
        match self.session.check_existing_authorization().await {
            Ok(address) => address,
            Err(err) => {
                tracing::warn!("[WavePortal] {}", err);
                self.status.report(&err);
                None
            }
        }
    }

    /// Handles the user's "connect wallet" intent.
    pub async fn connect(&self) -> Result<Address> {
        match self.session.request_connection().await {
            Ok(address) => {
                self.status.notify();
                Ok(address)
            }
            Err(err) => {
                tracing::warn!("[WavePortal] {}", err);
                self.status.report(&err);
                Err(err)
            }
        }
    }

    /// Handles the user's "wave" intent with the typed message.
    pub async fn submit(&self, message: &str) -> Result<Receipt> {
        let session = self.session.session();
        self.sync.on_user_submit(&session, message).await
    }

    /// Closes the live feed.
    pub async fn shutdown(&self) {
        self.sync.on_teardown().await;
    }

    pub fn snapshot(&self) -> PortalSnapshot {
        PortalSnapshot {
            account: self.session.address(),
            entries: self.sync.entries(),
            transaction: self.sync.transaction(),
            total_waves: self.sync.total_waves(),
            notice: self.status.notice(),
        }
    }

    /// Ticks on every observable state change.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.status.subscribe()
    }

    pub fn sync(&self) -> &SyncController {
        &self.sync
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }
}
