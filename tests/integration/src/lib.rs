//! Integration tests for mskauth.
//!
//! These exercise the workspace crates together: the signing vectors the
//! broker and STS verify byte-for-byte, the credential store and refresh
//! scheduling, and the per-connection handshake. No external services are
//! required.

use std::sync::{Arc, Mutex, Once};

use mskauth_core::{AwsRegion, Credential, Expiry, MskAuthError};
use mskauth_sasl::CredentialSource;

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A static (non-expiring) test credential.
#[must_use]
pub fn static_credential(access_key_id: &str) -> Credential {
    Credential::static_credential(
        access_key_id,
        "AWS_SECRET_ACCESS_KEY",
        AwsRegion::new("us-east-1"),
        None,
    )
}

/// A temporary test credential expiring `lifetime_ms` from now.
#[must_use]
pub fn temporary_credential(access_key_id: &str, lifetime_ms: i64) -> Credential {
    Credential {
        access_key_id: access_key_id.to_owned(),
        secret_access_key: "AWS_SECRET_ACCESS_KEY".to_owned(),
        region: AwsRegion::new("us-east-1"),
        session_token: Some("session-token".to_owned()),
        expiry: Expiry::At(chrono::Utc::now().timestamp_millis() + lifetime_ms),
    }
}

/// A credential source that pops one scripted result per refresh fire.
pub struct ScriptedSource {
    results: Mutex<Vec<Result<Credential, MskAuthError>>>,
}

impl ScriptedSource {
    /// Results are returned in the given order, one per call.
    #[must_use]
    pub fn new(mut results: Vec<Result<Credential, MskAuthError>>) -> Arc<Self> {
        results.reverse();
        Arc::new(Self {
            results: Mutex::new(results),
        })
    }
}

impl CredentialSource for ScriptedSource {
    async fn assume_role(&self) -> Result<Credential, MskAuthError> {
        self.results
            .lock()
            .expect("scripted source lock poisoned")
            .pop()
            .unwrap_or(Err(MskAuthError::StsTransport("script exhausted".to_owned())))
    }
}

mod test_auth_flow;
mod test_payload;
mod test_signing;
