//! Error types for mskauth.
//!
//! All failure modes across the workspace are represented by [`MskAuthError`],
//! with one variant per failure class. Transport and protocol errors from the
//! STS refresh path are retriable; configuration errors are fatal at client
//! construction; per-connection failures are surfaced to the connection owner.

/// Errors that can occur during SASL `AWS_MSK_IAM` authentication.
#[derive(Debug, thiserror::Error)]
pub enum MskAuthError {
    /// Missing or invalid configuration; fatal at client construction.
    #[error("configuration error: {0}")]
    Config(String),

    /// An install was attempted with a credential whose expiry is not in the
    /// future. The store is left unchanged.
    #[error("must supply an unexpired credential: now={now_ms}ms, exp={expires_at_ms}ms")]
    CredentialExpired { now_ms: i64, expires_at_ms: i64 },

    /// HTTPS failure talking to STS (connect, TLS, I/O, timeout).
    /// Retried by the refresh scheduler after its failure backoff.
    #[error("STS transport error: {0}")]
    StsTransport(String),

    /// A well-formed STS response that is either an `ErrorResponse` or is
    /// missing required fields. Retried like a transport failure.
    #[error("STS error: {0}")]
    StsProtocol(String),

    /// A connection attempted to authenticate before any credential was
    /// installed.
    #[error("AWS_MSK_IAM cannot log in because there is no credentials available; last error: {last_error}")]
    NoCredentialsAvailable { last_error: String },

    /// STS mode is enabled but the installed credential carries no session
    /// token (the first refresh has not landed yet).
    #[error("AWS_MSK_IAM_STS cannot authenticate; last error: {last_error}")]
    MissingSessionToken { last_error: String },

    /// The broker rejected the authentication payload; carries the broker's
    /// response bytes as text.
    #[error("SASL AWS_MSK_IAM authentication failed: broker response: {0}")]
    AuthRejected(String),

    /// The per-connection state machine was driven out of order.
    #[error("authentication state machine misuse: {0}")]
    InvalidState(&'static str),
}

/// Convenience result type for mskauth operations.
pub type MskAuthResult<T> = Result<T, MskAuthError>;
