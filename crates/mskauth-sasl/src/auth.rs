//! The per-connection authenticator.
//!
//! One instance authenticates one broker connection: it snapshots the store
//! at construction (so a refresh landing mid-handshake cannot desynchronize
//! the payload), emits the client-first message, and judges the server's
//! single response. The transport that carries the bytes is the caller's.

use std::time::Instant;

use tracing::debug;

use mskauth_core::{Credential, MskAuthError, MskAuthResult};
use mskauth_sigv4::timestamp::SigningTimestamp;

use crate::payload::build_sasl_payload;
use crate::store::CredentialStore;

/// Handshake latency above which a debug line is emitted.
const SLOW_STATE_THRESHOLD_MS: u128 = 100;

/// Where an authentication attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// The client-first message has not been produced yet.
    SendClientFirst,
    /// The client-first message is out; awaiting the server's response.
    AwaitServerResponse,
}

/// State machine for one SASL `AWS_MSK_IAM` authentication attempt.
#[derive(Debug)]
pub struct SaslAuthenticator {
    phase: AuthPhase,
    hostname: String,
    credential: Credential,
}

impl SaslAuthenticator {
    /// Begin an authentication attempt against `hostname`.
    ///
    /// Takes an immutable snapshot of the store's current credential.
    ///
    /// # Errors
    ///
    /// Fails with the store's snapshot errors when no usable credential is
    /// installed; the connection owner decides whether to wait and retry.
    pub fn new(store: &CredentialStore, hostname: impl Into<String>) -> MskAuthResult<Self> {
        let credential = store.snapshot()?;
        Ok(Self {
            phase: AuthPhase::SendClientFirst,
            hostname: hostname.into(),
            credential,
        })
    }

    /// The current phase of the attempt.
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// Produce the client-first message for the transport to send.
    ///
    /// # Errors
    ///
    /// Returns [`MskAuthError::InvalidState`] if the message was already
    /// produced.
    pub fn client_first_message(&mut self) -> MskAuthResult<Vec<u8>> {
        if self.phase != AuthPhase::SendClientFirst {
            return Err(MskAuthError::InvalidState(
                "client-first message already sent",
            ));
        }

        let started = Instant::now();
        let payload =
            build_sasl_payload(&self.credential, &self.hostname, &SigningTimestamp::now());
        self.phase = AuthPhase::AwaitServerResponse;

        let elapsed = started.elapsed();
        if elapsed.as_millis() >= SLOW_STATE_THRESHOLD_MS {
            debug!(
                hostname = %self.hostname,
                elapsed_ms = elapsed.as_millis() as u64,
                "slow SASL client-first message construction"
            );
        }

        Ok(payload.into_bytes())
    }

    /// Judge the server's response: empty bytes mean the broker accepted the
    /// authentication, anything else is its rejection reason.
    ///
    /// The attempt is terminal after this call either way.
    ///
    /// # Errors
    ///
    /// [`MskAuthError::AuthRejected`] with the broker's response text, or
    /// [`MskAuthError::InvalidState`] if no client-first message is in
    /// flight.
    pub fn handle_server_response(&mut self, response: &[u8]) -> MskAuthResult<()> {
        if self.phase != AuthPhase::AwaitServerResponse {
            return Err(MskAuthError::InvalidState(
                "no client-first message in flight",
            ));
        }

        if response.is_empty() {
            debug!(hostname = %self.hostname, "SASL AWS_MSK_IAM authentication succeeded");
            Ok(())
        } else {
            Err(MskAuthError::AuthRejected(
                String::from_utf8_lossy(response).into_owned(),
            ))
        }
    }
}
