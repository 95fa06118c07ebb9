//! AWS Signature Version 4 signing for mskauth.
//!
//! This crate implements the client-side SigV4 signing flow used both for the
//! STS `AssumeRole` request and for the SASL `AWS_MSK_IAM` payload the broker
//! validates:
//!
//! 1. Build a canonical request from the method, query string, headers, and
//!    body hash.
//! 2. Build the string to sign from the timestamp, credential scope, and
//!    canonical request hash.
//! 3. Derive the signing key from the secret key via the HMAC-SHA256 chain.
//! 4. Compute the final hex signature.
//!
//! Every function here is a deterministic, I/O-free function of its inputs;
//! a single byte of drift in canonicalization produces an opaque server-side
//! rejection, so the concrete output formats are pinned by tests.
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request and string-to-sign construction
//! - [`encode`] - AWS URI percent-encoding rules
//! - [`hash`] - SHA-256 and HMAC-SHA256 primitives
//! - [`signer`] - Signing-key derivation and the `Authorization` header
//! - [`timestamp`] - The signing timestamp captured from a single instant

pub mod canonical;
pub mod encode;
pub mod hash;
pub mod signer;
pub mod timestamp;

pub use canonical::{
    build_canonical_request, build_string_to_sign, canonical_headers, credential_scope,
};
pub use encode::uri_encode;
pub use hash::{hmac_sha256, sha256_hex};
pub use signer::{ALGORITHM, authorization_header, build_signature, derive_signing_key};
pub use timestamp::SigningTimestamp;
