//! The AWS credential value object.
//!
//! Credentials are created by the STS client or seeded from configuration,
//! replaced atomically as a whole, and never field-mutated. The session token
//! is present iff the credentials are temporary (STS-issued, or statically
//! configured with a token).

use chrono::Utc;

use crate::types::AwsRegion;

/// When a credential stops being usable.
///
/// Statically configured credentials never expire; STS-issued credentials
/// carry the `Expiration` instant parsed from the `AssumeRole` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Static credentials; conceptually "never expires".
    Never,
    /// Expires at the given instant, in milliseconds since the Unix epoch.
    At(i64),
}

impl Expiry {
    /// Milliseconds of lifetime remaining at `now_ms`, if bounded.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        match self {
            Expiry::Never => None,
            Expiry::At(t) => Some(t - now_ms),
        }
    }

    /// Whether the credential is already unusable at `now_ms`.
    #[must_use]
    pub fn is_expired(&self, now_ms: i64) -> bool {
        matches!(self, Expiry::At(t) if *t <= now_ms)
    }
}

/// An AWS credential set used for SigV4 signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// AWS access key id.
    pub access_key_id: String,
    /// AWS secret access key.
    pub secret_access_key: String,
    /// Region used in signing and for the STS endpoint.
    pub region: AwsRegion,
    /// Temporary session token. Present iff the credentials are temporary.
    pub session_token: Option<String>,
    /// When the credential expires.
    pub expiry: Expiry,
}

impl Credential {
    /// Create a non-expiring credential from statically configured values.
    #[must_use]
    pub fn static_credential(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: AwsRegion,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region,
            session_token,
            expiry: Expiry::Never,
        }
    }

    /// Whether the credential is expired right now.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expiry.is_expired(Utc::now().timestamp_millis())
    }
}
