//! Lifecycle of the user's own wave write.

use std::sync::Mutex;
use std::time::Duration;

use wavesync_core::error::{Result, WaveError};
use wavesync_core::ledger::{AppendOptions, LedgerClient, Receipt};
use wavesync_core::session::Session;
use wavesync_core::transaction::{PendingTransaction, TxPhase};
use wavesync_core::SubmitRejection;

use crate::status::StatusBoard;

const ABANDONED: &str = "submission abandoned";

#[derive(Default)]
struct TrackerState {
    current: Option<PendingTransaction>,
    /// Set from the moment a submission passes its preconditions until it
    /// reaches a terminal phase, covering the `append` call itself.
    busy: bool,
}

/// Drives one wave write at a time from submission to a terminal phase.
///
/// A second `submit` while a write is in flight is refused with
/// `SubmitRejection::TransactionInProgress`; nothing is queued.
pub struct TransactionTracker {
    state: Mutex<TrackerState>,
    options: AppendOptions,
    confirmation_timeout: Option<Duration>,
    status: StatusBoard,
}

impl TransactionTracker {
    /// Creates an idle tracker.
    ///
    /// # Arguments
    ///
    /// * `options` - Hints forwarded with every append
    /// * `confirmation_timeout` - How long to wait for mining; `None` waits indefinitely
    /// * `status` - Change feed notified on every phase transition
    pub fn new(
        options: AppendOptions,
        confirmation_timeout: Option<Duration>,
        status: StatusBoard,
    ) -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            options,
            confirmation_timeout,
            status,
        }
    }

    /// Returns the current phase (`Idle` if nothing was ever submitted).
    pub fn phase(&self) -> TxPhase {
        self.lock()
            .current
            .as_ref()
            .map(|tx| tx.phase.clone())
            .unwrap_or(TxPhase::Idle)
    }

    /// Returns a copy of the most recent transaction.
    pub fn current(&self) -> Option<PendingTransaction> {
        self.lock().current.clone()
    }

    /// Writes `message` to the ledger and waits for its outcome.
    ///
    /// The phase becomes `Submitted` as soon as the ledger accepts the write
    /// and stays there until it is mined.
    ///
    /// # Errors
    ///
    /// - `SubmitRejected(NotConnected | EmptyMessage | TransactionInProgress)`
    ///   when a precondition fails; the ledger is not called and the phase is
    ///   unchanged.
    /// - `SubmitRejected(Ledger(_))` when `append` fails; the phase becomes
    ///   `Failed` without passing through `Submitted`.
    /// - `ConfirmationFailed` when the write fails to finalize or times out;
    ///   the phase becomes `Failed`.
    ///
    /// Dropping the returned future before it completes ends the transaction
    /// as `Failed("submission abandoned")` so later submissions are accepted.
    pub async fn submit(
        &self,
        session: &Session,
        ledger: &dyn LedgerClient,
        message: &str,
    ) -> Result<Receipt> {
        if !session.is_connected() {
            return Err(WaveError::rejected(SubmitRejection::NotConnected));
        }
        if message.trim().is_empty() {
            return Err(WaveError::rejected(SubmitRejection::EmptyMessage));
        }
        let mut flight = self.reserve(message)?;

        let pending = match ledger.append(message, &self.options).await {
            Ok(pending) => pending,
            Err(err) => {
                tracing::warn!("[TransactionTracker] Append rejected: {}", err);
                let err = WaveError::append_failed(err);
                flight.finish(TxPhase::Failed(err.to_string()));
                return Err(err);
            }
        };

        let hash = pending.hash().to_string();
        tracing::info!("[TransactionTracker] Mining... {}", hash);
        flight.submitted(hash.clone());

        let outcome = match self.confirmation_timeout {
            Some(limit) => match tokio::time::timeout(limit, pending.wait()).await {
                Ok(outcome) => outcome.map_err(WaveError::confirmation_failed),
                Err(_) => Err(WaveError::ConfirmationFailed(format!(
                    "not mined within {}s",
                    limit.as_secs()
                ))),
            },
            None => pending.wait().await.map_err(WaveError::confirmation_failed),
        };

        match outcome {
            Ok(receipt) => {
                tracing::info!("[TransactionTracker] Mined -- {}", receipt.hash);
                flight.finish(TxPhase::Confirmed);
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!("[TransactionTracker] Wave {} failed: {}", hash, err);
                flight.finish(TxPhase::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    fn reserve(&self, message: &str) -> Result<InFlight<'_>> {
        let mut state = self.lock();
        if state.busy {
            return Err(WaveError::rejected(SubmitRejection::TransactionInProgress));
        }
        state.busy = true;
        Ok(InFlight {
            tracker: self,
            message: message.to_string(),
            hash: None,
            done: false,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Reservation held by one `submit` call.
///
/// Dropping it before `finish`, as happens when the caller abandons the
/// future, ends the transaction as `Failed` and frees the tracker.
struct InFlight<'a> {
    tracker: &'a TransactionTracker,
    message: String,
    hash: Option<String>,
    done: bool,
}

impl InFlight<'_> {
    fn submitted(&mut self, hash: String) {
        {
            let mut state = self.tracker.lock();
            let mut tx = PendingTransaction::new(self.message.clone());
            tx.submitted(hash.clone());
            state.current = Some(tx);
        }
        self.hash = Some(hash);
        self.tracker.status.notify();
    }

    fn finish(&mut self, phase: TxPhase) {
        if self.done {
            return;
        }
        self.done = true;
        {
            let mut state = self.tracker.lock();
            state.current = Some(PendingTransaction {
                message: self.message.clone(),
                phase,
                hash: self.hash.clone(),
            });
            state.busy = false;
        }
        self.tracker.status.notify();
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            tracing::warn!(
                "[TransactionTracker] Submission of {:?} abandoned by caller",
                self.hash
            );
            self.finish(TxPhase::Failed(ABANDONED.to_string()));
        }
    }
}
