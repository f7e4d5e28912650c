//! Change feed and user-facing notice shared by the application services.

use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use wavesync_core::WaveError;

/// Tells the UI when to re-render and what to say about the last failure.
///
/// Each observable state change bumps a revision on a `watch` channel; the
/// UI waits on it and then pulls a fresh snapshot.
#[derive(Clone)]
pub struct StatusBoard {
    revision: Arc<watch::Sender<u64>>,
    notice: Arc<Mutex<Option<String>>>,
}

impl StatusBoard {
    /// Creates a board at revision 0 with no notice.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            revision: Arc::new(revision),
            notice: Arc::new(Mutex::new(None)),
        }
    }

    /// Signals that observable state changed.
    pub fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Records `err` as the displayable notice and signals a change.
    pub fn report(&self, err: &WaveError) {
        *self.notice.lock().unwrap_or_else(|p| p.into_inner()) = Some(err.to_string());
        self.notify();
    }

    /// Clears the notice, signalling a change only if one was set.
    pub fn clear_notice(&self) {
        let cleared = self
            .notice
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take()
            .is_some();
        if cleared {
            self.notify();
        }
    }

    pub fn notice(&self) -> Option<String> {
        self.notice.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Returns a receiver that observes every revision bump.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
