//! Transaction domain module.
//!
//! This module contains the lifecycle model of the user's own wave write.

mod model;

pub use model::{PendingTransaction, TxPhase};
