//! Wake-up and error signaling toward the enclosing client.
//!
//! The store needs to wake connection workers after an install and surface
//! authentication errors to the client's asynchronous error stream. Both go
//! through [`BrokerNotifier`], an interface the store consumes, so the store
//! never holds an owning reference back to the client.

use tokio::sync::mpsc;

/// Signals the store sends toward the enclosing client.
pub trait BrokerNotifier: Send + Sync {
    /// Wake every connection worker; called after a credential install.
    fn wake_all(&self, reason: &str);

    /// Emit an authentication-error event to the client's error stream.
    fn auth_error(&self, message: &str);
}

/// A notifier that drops every signal; for callers with no error stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl BrokerNotifier for NullNotifier {
    fn wake_all(&self, _reason: &str) {}

    fn auth_error(&self, _message: &str) {}
}

/// An event delivered on the client's asynchronous stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Connection workers were woken after a credential update.
    BrokersWoken {
        /// Why the wake-up happened.
        reason: String,
    },
    /// Acquiring a credential failed with a new error.
    AuthenticationError {
        /// Human-readable failure text.
        message: String,
    },
}

/// A [`BrokerNotifier`] that forwards signals onto an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<AuthEvent>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its event stream.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AuthEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl BrokerNotifier for ChannelNotifier {
    fn wake_all(&self, reason: &str) {
        let _ = self.tx.send(AuthEvent::BrokersWoken {
            reason: reason.to_owned(),
        });
    }

    fn auth_error(&self, message: &str) {
        let _ = self.tx.send(AuthEvent::AuthenticationError {
            message: message.to_owned(),
        });
    }
}
