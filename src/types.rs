//! Core value types shared across the store, ingestion and reconciliation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of hex characters in a fingerprint (128-bit digest).
pub const FINGERPRINT_HEX_LEN: usize = 32;

/// Wall-clock timestamp recorded on path records and entries.
pub type Timestamp = DateTime<Utc>;

/// Current time, truncated to whole seconds like the persisted RFC 3339 form.
pub fn now() -> Timestamp {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Render a timestamp the way the database stores it.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Reasons a string is rejected as a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FingerprintError {
    #[error("fingerprint must be {expected} hex characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("fingerprint contains invalid character {0:?} (expected lowercase hex)")]
    Character(char),
}

/// Content fingerprint: fixed-length lowercase hex.
///
/// Construction always goes through [`Fingerprint::parse`], so a value of this
/// type is known to satisfy the format contract. Deserialization validates too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn parse(value: &str) -> Result<Self, FingerprintError> {
        if value.len() != FINGERPRINT_HEX_LEN {
            return Err(FingerprintError::Length {
                expected: FINGERPRINT_HEX_LEN,
                actual: value.chars().count(),
            });
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(FingerprintError::Character(bad));
        }
        Ok(Self(value.to_string()))
    }

    /// Build from raw digest bytes. Fails unless exactly 16 bytes are given.
    pub fn from_digest(bytes: &[u8]) -> Result<Self, FingerprintError> {
        Self::parse(&hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters followed by `...`, for display.
    pub fn short(&self) -> String {
        format!("{}...", &self.0[..8])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
