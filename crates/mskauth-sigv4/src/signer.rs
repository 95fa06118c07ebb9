//! Signing-key derivation and the final signature.

use crate::hash::hmac_sha256;

/// The only algorithm supported by this implementation.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Derive the SigV4 signing key via the HMAC-SHA256 chain.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
///
/// `"AWS4" + secret_key` is a UTF-8 byte concatenation, not a hex operation.
#[must_use]
pub fn derive_signing_key(secret_key: &str, ymd: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), ymd.as_bytes());
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
    hmac_sha256(&date_region_service_key, b"aws4_request")
}

/// Derive the signing key and sign `string_to_sign`, returning the
/// 64-character lowercase hex signature.
#[must_use]
pub fn build_signature(
    secret_key: &str,
    ymd: &str,
    region: &str,
    service: &str,
    string_to_sign: &str,
) -> String {
    let signing_key = derive_signing_key(secret_key, ymd, region, service);
    hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()))
}

/// Assemble the `Authorization` header value.
///
/// # Examples
///
/// ```
/// use mskauth_sigv4::signer::authorization_header;
///
/// let header = authorization_header(
///     "TESTKEY",
///     "20210910/us-east-1/sts/aws4_request",
///     "content-length;content-type;host;x-amz-date",
///     "a825a6136b83c3feb7993b9d2947f6e479901f805089b08f717c0f2a03cd98f0",
/// );
/// assert!(header.starts_with("AWS4-HMAC-SHA256 Credential=TESTKEY/"));
/// ```
#[must_use]
pub fn authorization_header(
    access_key_id: &str,
    credential_scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{ALGORITHM} Credential={access_key_id}/{credential_scope}, \
         SignedHeaders={signed_headers}, Signature={signature}"
    )
}
