//! Wave entry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WaveError};

/// Ledger-assigned sender identity.
///
/// Compared byte for byte. No case folding or checksum normalization is
/// applied, because entries from the bulk read and from the live feed come
/// from the same source and carry the same spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A wave exactly as the ledger reports it.
///
/// `timestamp` is in ledger-native seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub sender: String,
    pub timestamp: u64,
    pub text: String,
}

impl RawEntry {
    pub fn new(sender: impl Into<String>, timestamp: u64, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            timestamp,
            text: text.into(),
        }
    }
}

/// One wave in the reconciled log.
///
/// Immutable once constructed. Two entries are the same wave when the whole
/// `(address, timestamp, message)` tuple is equal; the ledger assigns no
/// sequence id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    address: Address,
    timestamp: DateTime<Utc>,
    message: String,
}

impl Entry {
    pub fn new(address: Address, timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            address,
            timestamp,
            message: message.into(),
        }
    }

    /// Converts a ledger record, scaling its seconds to milliseconds first.
    ///
    /// # Errors
    ///
    /// Returns `WaveError::MalformedEntry` when the timestamp does not fit a
    /// millisecond instant.
    pub fn from_raw(raw: RawEntry) -> Result<Self> {
        let millis = raw
            .timestamp
            .checked_mul(1000)
            .and_then(|ms| i64::try_from(ms).ok())
            .ok_or_else(|| {
                WaveError::malformed(format!("timestamp {} overflows", raw.timestamp))
            })?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            WaveError::malformed(format!("timestamp {} is out of range", raw.timestamp))
        })?;

        Ok(Self {
            address: Address(raw.sender),
            timestamp,
            message: raw.text,
        })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<RawEntry> for Entry {
    type Error = WaveError;

    fn try_from(raw: RawEntry) -> Result<Self> {
        Self::from_raw(raw)
    }
}
