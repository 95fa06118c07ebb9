//! The credential refresh task.
//!
//! A single tokio task sleeps until the deadline armed in the store, calls
//! the credential source, and installs the result (or records the failure,
//! which re-arms a 10-second retry). Re-arms from `install`/`record_failure`
//! interrupt the sleep through the store's watch channel, so fires are never
//! concurrent with themselves.
//!
//! The task holds only a `Weak` reference to the store: dropping the client
//! (and with it the store) ends the loop instead of keeping it alive.

use std::future::Future;
use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use mskauth_core::{Credential, MskAuthError};

use crate::store::CredentialStore;

/// A source of fresh credentials; implemented by the STS client.
pub trait CredentialSource: Send + Sync + 'static {
    /// Acquire a new temporary credential.
    fn assume_role(&self) -> impl Future<Output = Result<Credential, MskAuthError>> + Send;
}

impl<T: CredentialSource + ?Sized> CredentialSource for Arc<T> {
    async fn assume_role(&self) -> Result<Credential, MskAuthError> {
        (**self).assume_role().await
    }
}

/// Handle to a running refresh task.
#[derive(Debug)]
pub struct RefreshHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the refresh task, waiting for an in-flight fire to complete.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the refresh task for `store`, drawing credentials from `source`.
#[must_use]
pub fn spawn<S: CredentialSource>(store: &Arc<CredentialStore>, source: S) -> RefreshHandle {
    let weak = Arc::downgrade(store);
    let deadline_rx = store.subscribe_refresh();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run(weak, source, deadline_rx, shutdown_rx));
    RefreshHandle { shutdown_tx, task }
}

async fn run<S: CredentialSource>(
    store: Weak<CredentialStore>,
    source: S,
    mut deadline_rx: watch::Receiver<Option<Instant>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow_and_update() {
            break;
        }
        let deadline = *deadline_rx.borrow_and_update();

        tokio::select! {
            changed = deadline_rx.changed() => {
                if changed.is_err() {
                    // Store dropped; nothing left to refresh.
                    break;
                }
            }
            _ = shutdown_rx.changed() => break,
            () = wait_until(deadline) => {
                let Some(store) = store.upgrade() else { break };
                store.disarm_refresh();

                debug!("refreshing AWS credentials");
                match source.assume_role().await {
                    Ok(credential) => {
                        info!("new AWS credentials retrieved from STS");
                        if let Err(e) = store.install(credential) {
                            warn!(error = %e, "refreshed AWS credential was rejected");
                            store.record_failure(&e.to_string());
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "AWS credential refresh failed");
                        store.record_failure(&e.to_string());
                    }
                }
            }
        }
    }
    debug!("credential refresh task exiting");
}

/// Sleep until the armed deadline; pend forever while nothing is armed.
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
