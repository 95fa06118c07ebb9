//! SHA-256 and HMAC-SHA256 primitives.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Compute the SHA-256 hash of the given payload and return it as a
/// lowercase hex string.
///
/// This is the "payload hash" line of a canonical request.
///
/// # Examples
///
/// ```
/// use mskauth_sigv4::hash::sha256_hex;
///
/// // SHA-256 of the empty payload
/// assert_eq!(
///     sha256_hex(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn sha256_hex(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// Compute HMAC-SHA256 over `data` with the given raw-byte `key` and return
/// the raw 32-byte result.
///
/// Keys and data are arbitrary binary; the signing-key derivation chain
/// feeds each output back in as the next key.
#[must_use]
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
