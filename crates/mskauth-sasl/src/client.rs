//! The per-client-instance handle.
//!
//! Owns the credential store and, when STS mode is enabled, the refresh
//! task. Construction validates configuration (fatal on failure), seeds the
//! store from the configured static values, and forces an immediate first
//! refresh fire under STS so temporary credentials arrive as soon as
//! possible.

use std::sync::Arc;

use tracing::debug;

use mskauth_core::{Credential, MskAuthConfig, MskAuthResult};
use mskauth_sts::StsClient;

use crate::auth::SaslAuthenticator;
use crate::notify::BrokerNotifier;
use crate::refresh::{self, CredentialSource, RefreshHandle};
use crate::store::CredentialStore;

impl CredentialSource for StsClient {
    fn assume_role(
        &self,
    ) -> impl std::future::Future<Output = MskAuthResult<Credential>> + Send {
        StsClient::assume_role(self)
    }
}

/// A configured SASL `AWS_MSK_IAM` client instance.
#[derive(Debug)]
pub struct MskIamClient {
    store: Arc<CredentialStore>,
    refresh: Option<RefreshHandle>,
}

impl MskIamClient {
    /// Build a client from configuration.
    ///
    /// The store is seeded with the configured static credential; under STS
    /// mode those values sign the `AssumeRole` calls while connection
    /// attempts are held off until the first temporary credential (with its
    /// session token) is installed.
    ///
    /// With STS enabled this spawns the refresh task and must be called from
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MskAuthError::Config`] when validation fails; this is fatal
    /// at client construction.
    ///
    /// [`MskAuthError::Config`]: mskauth_core::MskAuthError::Config
    pub fn new(
        config: MskAuthConfig,
        notifier: Arc<dyn BrokerNotifier>,
    ) -> MskAuthResult<Self> {
        config.validate()?;

        let store = CredentialStore::new(config.enable_sts, notifier);
        store.install(Credential::static_credential(
            &config.access_key_id,
            &config.secret_access_key,
            config.region.clone(),
            config.session_token.clone(),
        ))?;

        let refresh = if config.enable_sts && config.duration_sec > 0 {
            let sts = StsClient::new(&config)?;
            // The steady-state cadence comes from each install; the first
            // fire happens immediately.
            store.request_refresh();
            debug!("enqueuing AWS_MSK_IAM credential refresh");
            Some(refresh::spawn(&store, sts))
        } else {
            debug!("STS not enabled, static AWS_MSK_IAM credentials will not be refreshed");
            None
        };

        Ok(Self { store, refresh })
    }

    /// The shared credential store.
    #[must_use]
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Begin a per-connection authentication attempt against `hostname`.
    ///
    /// # Errors
    ///
    /// Fails when no usable credential is installed yet; see
    /// [`CredentialStore::snapshot`].
    pub fn new_authentication(&self, hostname: impl Into<String>) -> MskAuthResult<SaslAuthenticator> {
        SaslAuthenticator::new(&self.store, hostname)
    }

    /// Tear the client down: stop the refresh task (waiting for an in-flight
    /// fire), then drop the store.
    pub async fn shutdown(self) {
        if let Some(refresh) = self.refresh {
            refresh.shutdown().await;
        }
    }
}
