//! Signed STS `AssumeRole` client for mskauth.
//!
//! Composes a SigV4-signed POST to the AWS Security Token Service, performs
//! the HTTPS call, and parses the XML response into a [`Credential`] with the
//! expiry taken from the response's `Expiration` field.
//!
//! Only active when STS mode is enabled in configuration; with static
//! credentials this crate is never invoked.
//!
//! [`Credential`]: mskauth_core::Credential

pub mod client;
pub mod request;
pub mod xml;

pub use client::StsClient;
pub use request::{AssumeRoleParams, SignedAssumeRole};
pub use xml::{StsCredentials, parse_assume_role_response};
