//! Transaction lifecycle model.
//!
//! A wave write moves `Idle → Submitted → {Confirmed | Failed}`. `Submitted`
//! is the mining window between the ledger accepting the write and the write
//! being finalized.

use serde::{Deserialize, Serialize};

/// Phase of a wave write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "reason", rename_all = "snake_case")]
pub enum TxPhase {
    /// Nothing has been submitted yet.
    Idle,
    /// The ledger accepted the write and it is being mined.
    Submitted,
    /// The write was finalized.
    Confirmed,
    /// The write was refused or did not finalize.
    Failed(String),
}

impl TxPhase {
    /// Whether this phase ends a submission.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxPhase::Confirmed | TxPhase::Failed(_))
    }

    /// Whether a new submission may start from this phase.
    pub fn accepts_submission(&self) -> bool {
        !matches!(self, TxPhase::Submitted)
    }
}

/// The user's most recent wave write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Text being written.
    pub message: String,
    /// Current lifecycle phase.
    pub phase: TxPhase,
    /// Transaction hash, once the ledger accepted the write.
    pub hash: Option<String>,
}

impl PendingTransaction {
    /// Creates a transaction in the `Idle` phase.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase: TxPhase::Idle,
            hash: None,
        }
    }

    /// Enters the mining window.
    pub fn submitted(&mut self, hash: impl Into<String>) {
        self.hash = Some(hash.into());
        self.phase = TxPhase::Submitted;
    }

    pub fn confirm(&mut self) {
        self.phase = TxPhase::Confirmed;
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.phase = TxPhase::Failed(reason.into());
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == TxPhase::Submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!TxPhase::Idle.is_terminal());
        assert!(!TxPhase::Submitted.is_terminal());
        assert!(TxPhase::Confirmed.is_terminal());
        assert!(TxPhase::Failed("x".into()).is_terminal());
    }

    #[test]
    fn test_only_submitted_blocks_new_submission() {
        assert!(TxPhase::Idle.accepts_submission());
        assert!(!TxPhase::Submitted.accepts_submission());
        assert!(TxPhase::Confirmed.accepts_submission());
        assert!(TxPhase::Failed("x".into()).accepts_submission());
    }

    #[test]
    fn test_lifecycle() {
        let mut tx = PendingTransaction::new("hello");
        assert_eq!(tx.phase, TxPhase::Idle);
        assert!(tx.hash.is_none());

        tx.submitted("0xhash");
        assert!(tx.is_in_flight());
        assert_eq!(tx.hash.as_deref(), Some("0xhash"));

        tx.confirm();
        assert_eq!(tx.phase, TxPhase::Confirmed);
        assert!(!tx.is_in_flight());
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_value(TxPhase::Failed("reverted".into())).unwrap();
        assert_eq!(json["phase"], "failed");
        assert_eq!(json["reason"], "reverted");
    }
}
