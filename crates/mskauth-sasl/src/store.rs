//! The process-wide credential store.
//!
//! One writer at a time (the refresh path), any number of reader snapshots
//! (connection workers). The credential and the last refresh error live under
//! the same lock so an observer never pairs an error string with a credential
//! state it does not describe. No lock is held across I/O or while signaling.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::{Notify, watch};
use tokio::time::Instant;
use tracing::debug;

use mskauth_core::{Credential, Expiry, MskAuthError, MskAuthResult};

use crate::notify::BrokerNotifier;

/// Retry interval after a failed refresh.
pub const REFRESH_RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// Numerator/denominator of the refresh horizon: refresh fires at 80% of the
/// credential's remaining lifetime.
const REFRESH_HORIZON_NUM: i64 = 8;
const REFRESH_HORIZON_DEN: i64 = 10;

/// Text reported when no refresh error has been recorded yet.
const NO_ERROR_YET: &str = "(not available)";

#[derive(Debug, Default)]
struct StoreState {
    credential: Option<Credential>,
    last_error: Option<String>,
}

/// Shared store of the current credential and refresh scheduling state.
pub struct CredentialStore {
    inner: RwLock<StoreState>,
    sts_enabled: bool,
    /// Armed deadline of the next refresh fire; the refresh task watches this.
    refresh_deadline: watch::Sender<Option<Instant>>,
    /// Released whenever a credential is installed.
    installed: Notify,
    notifier: Arc<dyn BrokerNotifier>,
}

impl CredentialStore {
    /// Create an empty store.
    ///
    /// `sts_enabled` governs the session-token requirement on [`snapshot`]:
    /// under STS a credential without a token is not yet usable.
    ///
    /// [`snapshot`]: CredentialStore::snapshot
    #[must_use]
    pub fn new(sts_enabled: bool, notifier: Arc<dyn BrokerNotifier>) -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(StoreState::default()),
            sts_enabled,
            refresh_deadline: watch::Sender::new(None),
            installed: Notify::new(),
            notifier,
        })
    }

    /// Install a credential, replacing the current one atomically.
    ///
    /// Clears the last refresh error, schedules the next refresh at 80% of
    /// the credential's remaining lifetime, then releases blocked workers and
    /// signals the enclosing client.
    ///
    /// # Errors
    ///
    /// Returns [`MskAuthError::CredentialExpired`] (leaving the store
    /// untouched) when the credential's expiry is not strictly in the future.
    pub fn install(&self, credential: Credential) -> MskAuthResult<()> {
        let now_ms = Utc::now().timestamp_millis();
        if let Expiry::At(expires_at_ms) = credential.expiry {
            if expires_at_ms <= now_ms {
                return Err(MskAuthError::CredentialExpired {
                    now_ms,
                    expires_at_ms,
                });
            }
        }

        let remaining_ms = credential.expiry.remaining_ms(now_ms);
        {
            let mut state = self.inner.write();
            state.credential = Some(credential);
            state.last_error = None;
        }

        if let Some(remaining_ms) = remaining_ms {
            let horizon_ms = (remaining_ms * REFRESH_HORIZON_NUM / REFRESH_HORIZON_DEN) as u64;
            self.arm_refresh_in(Duration::from_millis(horizon_ms));
        }

        debug!("waking waiting broker threads after installing AWS_MSK_IAM credential");
        self.installed.notify_waiters();
        self.notifier.wake_all("AWS_MSK_IAM credential refresh");

        Ok(())
    }

    /// Record a failed refresh.
    ///
    /// The current credential is left in place (it may have life left) and
    /// the next refresh is scheduled for ten seconds out. A changed error
    /// string is stored and emitted as an authentication-error event;
    /// repeats of the current error are swallowed.
    pub fn record_failure(&self, errstr: &str) {
        self.arm_refresh_in(REFRESH_RETRY_INTERVAL);

        if errstr.is_empty() {
            return;
        }

        let changed = {
            let mut state = self.inner.write();
            let changed = state.last_error.as_deref() != Some(errstr);
            if changed {
                state.last_error = Some(errstr.to_owned());
            }
            changed
        };

        if changed {
            self.notifier.auth_error(&format!(
                "Failed to acquire SASL AWS_MSK_IAM credential: {errstr}"
            ));
        }
    }

    /// Snapshot the current credential for a single connection attempt.
    ///
    /// # Errors
    ///
    /// [`MskAuthError::NoCredentialsAvailable`] before the first install, and
    /// [`MskAuthError::MissingSessionToken`] when STS mode is enabled but the
    /// installed credential has no session token yet. Both carry the last
    /// refresh error for diagnosis.
    pub fn snapshot(&self) -> MskAuthResult<Credential> {
        let state = self.inner.read();
        let last_error = || {
            state
                .last_error
                .clone()
                .unwrap_or_else(|| NO_ERROR_YET.to_owned())
        };

        match &state.credential {
            None => Err(MskAuthError::NoCredentialsAvailable {
                last_error: last_error(),
            }),
            Some(credential) if self.sts_enabled && credential.session_token.is_none() => {
                Err(MskAuthError::MissingSessionToken {
                    last_error: last_error(),
                })
            }
            Some(credential) => Ok(credential.clone()),
        }
    }

    /// Park until a credential is installed, then return a snapshot of it.
    ///
    /// Released by [`install`](CredentialStore::install) within a bounded
    /// delay; workers that wake observe the new credential.
    pub async fn await_credential(&self) -> Credential {
        loop {
            let installed = self.installed.notified();
            if let Some(credential) = self.inner.read().credential.clone() {
                return credential;
            }
            installed.await;
        }
    }

    /// The last recorded refresh error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.inner.read().last_error.clone()
    }

    /// When the next refresh is armed to fire, if at all.
    #[must_use]
    pub fn next_refresh_deadline(&self) -> Option<Instant> {
        *self.refresh_deadline.borrow()
    }

    /// Arm the refresh task to fire as soon as possible.
    ///
    /// Used at client startup to pull the first STS credential immediately;
    /// also useful to force an early rotation.
    pub fn request_refresh(&self) {
        self.arm_refresh_in(Duration::ZERO);
    }

    /// Watch refresh-deadline changes; used by the refresh task.
    pub(crate) fn subscribe_refresh(&self) -> watch::Receiver<Option<Instant>> {
        self.refresh_deadline.subscribe()
    }

    /// Arm the next refresh fire `delay` from now.
    pub(crate) fn arm_refresh_in(&self, delay: Duration) {
        self.refresh_deadline.send_replace(Some(Instant::now() + delay));
    }

    /// Take down the armed deadline when a fire begins.
    pub(crate) fn disarm_refresh(&self) {
        self.refresh_deadline.send_replace(None);
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("CredentialStore")
            .field("has_credential", &state.credential.is_some())
            .field("last_error", &state.last_error)
            .field("sts_enabled", &self.sts_enabled)
            .finish()
    }
}
