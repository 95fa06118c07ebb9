//! AWS URI percent-encoding.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// The set of characters that must be percent-encoded in signed values.
///
/// Per the SigV4 spec, everything except the unreserved characters
/// (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`) is encoded, with uppercase hex digits.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// URI-encode a value using the AWS SigV4 encoding rules.
///
/// Applied to request values only, never to structural delimiters: the `&`
/// and `=` separators of a query string are written literally by the caller.
///
/// # Examples
///
/// ```
/// use mskauth_sigv4::encode::uri_encode;
///
/// assert_eq!(uri_encode("testString-123/*&"), "testString-123%2F%2A%26");
/// assert_eq!(uri_encode("kafka-cluster:Connect"), "kafka-cluster%3AConnect");
/// ```
#[must_use]
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}
