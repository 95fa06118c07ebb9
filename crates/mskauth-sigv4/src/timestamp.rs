//! The signing timestamp.
//!
//! SigV4 signs three renderings of the same instant: the `YYYYMMDD` date of
//! the credential scope, the `HHMMSS` time, and the composed
//! `YYYYMMDDTHHMMSSZ` `X-Amz-Date`. All three must come from ONE captured
//! instant; deriving them from separate clock reads can straddle a second
//! (or day) boundary and produce a signature the server rejects.

use chrono::{DateTime, Utc};

/// A UTC instant broken into the string forms SigV4 signs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningTimestamp {
    ymd: String,
    hms: String,
}

impl SigningTimestamp {
    /// Capture the current UTC instant.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build from an explicit instant.
    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            ymd: instant.format("%Y%m%d").to_string(),
            hms: instant.format("%H%M%S").to_string(),
        }
    }

    /// Build from pre-rendered `YYYYMMDD` / `HHMMSS` strings.
    ///
    /// Used by tests pinning the published signing vectors.
    #[must_use]
    pub fn from_parts(ymd: impl Into<String>, hms: impl Into<String>) -> Self {
        Self {
            ymd: ymd.into(),
            hms: hms.into(),
        }
    }

    /// The `YYYYMMDD` date used in the credential scope and key derivation.
    #[must_use]
    pub fn ymd(&self) -> &str {
        &self.ymd
    }

    /// The `HHMMSS` time of day.
    #[must_use]
    pub fn hms(&self) -> &str {
        &self.hms
    }

    /// The composed `YYYYMMDDTHHMMSSZ` value of `X-Amz-Date`.
    #[must_use]
    pub fn amz_date(&self) -> String {
        format!("{}T{}Z", self.ymd, self.hms)
    }
}
