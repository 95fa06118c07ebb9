//! SASL `AWS_MSK_IAM` authentication for Kafka clients.
//!
//! This crate ties the mskauth workspace together: it builds the signed
//! payload an MSK-compatible broker validates, holds the process-wide
//! credential store shared by all connections, refreshes temporary
//! credentials from STS ahead of expiry, and drives the two-state
//! per-connection handshake.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mskauth_core::MskAuthConfig;
//! use mskauth_sasl::{ChannelNotifier, MskIamClient};
//!
//! # async fn example() -> Result<(), mskauth_core::MskAuthError> {
//! let config = MskAuthConfig::from_options(vec![
//!     ("aws.access.key.id", "AKIA..."),
//!     ("aws.secret.access.key", "..."),
//!     ("aws.region", "us-east-1"),
//! ])?;
//!
//! let (notifier, _events) = ChannelNotifier::new();
//! let client = MskIamClient::new(config, Arc::new(notifier))?;
//!
//! // One authenticator per broker connection:
//! let mut auth = client.new_authentication("b-1.cluster.kafka.us-east-1.amazonaws.com")?;
//! let client_first = auth.client_first_message()?;
//! // ... send client_first over the SASL transport, read the response ...
//! auth.handle_server_response(b"")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`auth`] - Per-connection authenticator state machine
//! - [`client`] - The per-client-instance handle wiring everything together
//! - [`notify`] - Wake-up and error signaling toward the enclosing client
//! - [`payload`] - The signed `kafka-cluster:Connect` JSON payload
//! - [`refresh`] - The credential refresh task
//! - [`store`] - The shared credential store

pub mod auth;
pub mod client;
pub mod notify;
pub mod payload;
pub mod refresh;
pub mod store;

pub use auth::{AuthPhase, SaslAuthenticator};
pub use client::MskIamClient;
pub use notify::{AuthEvent, BrokerNotifier, ChannelNotifier, NullNotifier};
pub use payload::build_sasl_payload;
pub use refresh::{CredentialSource, RefreshHandle};
pub use store::CredentialStore;
