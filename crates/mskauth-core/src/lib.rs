//! Core types, configuration, and errors for mskauth.
//!
//! This crate provides the foundational building blocks shared across the
//! mskauth workspace: the credential value object and its expiry model,
//! the recognized configuration options (with validation), and the common
//! error type.

mod config;
mod credential;
mod error;
mod types;

pub use config::{MskAuthConfig, TlsMaterial};
pub use credential::{Credential, Expiry};
pub use error::{MskAuthError, MskAuthResult};
pub use types::AwsRegion;
