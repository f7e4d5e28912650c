//! Entry domain module.
//!
//! This module contains the wave entry models and the reconciled log that
//! merges the historical read with the live feed.
//!
//! # Module Structure
//!
//! - `model`: Ledger records (`RawEntry`) and their display-ready form (`Entry`, `Address`)
//! - `log`: The deduplicated, append-only `EntryLog`
//!
//! # Usage
//!
//! ```ignore
//! use wavesync_core::entry::{Address, Entry, EntryLog, RawEntry};
//! ```

mod log;
mod model;

// Re-export public API
pub use log::EntryLog;
pub use model::{Address, Entry, RawEntry};
