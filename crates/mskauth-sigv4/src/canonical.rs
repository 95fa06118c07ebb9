//! Canonical request and string-to-sign construction.
//!
//! The canonical request format is:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! Two conventions are specific to the requests this workspace signs and are
//! verified byte-for-byte by the server:
//!
//! - The canonical URI is always `/`.
//! - The canonical headers block is a sequence of newline-terminated
//!   `name:value` lines (so a blank line separates it from `SignedHeaders`),
//!   in the order of the signed-headers list, NOT re-sorted.
//!
//! Query-string ordering is likewise fixed by the producer; see the SASL
//! payload builder for the one ordered query string in this workspace.

use crate::hash::sha256_hex;
use crate::signer::ALGORITHM;

/// Build the credential scope binding a derived key to one (day, region,
/// service).
///
/// # Examples
///
/// ```
/// use mskauth_sigv4::canonical::credential_scope;
///
/// assert_eq!(
///     credential_scope("20210910", "us-east-1", "sts"),
///     "20210910/us-east-1/sts/aws4_request"
/// );
/// ```
#[must_use]
pub fn credential_scope(ymd: &str, region: &str, service: &str) -> String {
    format!("{ymd}/{region}/{service}/aws4_request")
}

/// Build a canonical headers block from `(name, value)` pairs.
///
/// Each line is `name:value` terminated by `\n`, in the given order. Names
/// are lowercased and values trimmed of surrounding whitespace.
#[must_use]
pub fn canonical_headers(headers: &[(&str, &str)]) -> String {
    let mut block = String::new();
    for (name, value) in headers {
        block.push_str(&name.to_lowercase());
        block.push(':');
        block.push_str(value.trim());
        block.push('\n');
    }
    block
}

/// Build the full canonical request.
///
/// `canonical_headers` must be the newline-terminated block produced by
/// [`canonical_headers`]; the payload hash is computed here from the raw
/// request body.
#[must_use]
pub fn build_canonical_request(
    method: &str,
    canonical_query_string: &str,
    canonical_headers: &str,
    signed_headers: &str,
    request_body: &[u8],
) -> String {
    let payload_hash = sha256_hex(request_body);
    format!(
        "{method}\n/\n{canonical_query_string}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
    )
}

/// Build the string to sign from the timestamp, credential scope, and
/// canonical request (hashed here).
///
/// ```text
/// AWS4-HMAC-SHA256\n
/// <amz_date>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
#[must_use]
pub fn build_string_to_sign(
    amz_date: &str,
    credential_scope: &str,
    canonical_request: &str,
) -> String {
    let hashed_canonical_request = sha256_hex(canonical_request.as_bytes());
    format!("{ALGORITHM}\n{amz_date}\n{credential_scope}\n{hashed_canonical_request}")
}
