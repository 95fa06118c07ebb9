//! The SASL `AWS_MSK_IAM` client-first payload.
//!
//! The broker validates a JSON object whose `x-amz-signature` field is a
//! SigV4 signature over a canonical GET request for the
//! `kafka-cluster:Connect` action. Field order, the fixed query-string
//! order, and the encoding split (the JSON carries the RAW session token
//! while the signed query string carries it URI-encoded) are all part of
//! what the broker checks.

use serde::Serialize;
use tracing::debug;

use mskauth_core::Credential;
use mskauth_sigv4::canonical::{
    build_canonical_request, build_string_to_sign, canonical_headers, credential_scope,
};
use mskauth_sigv4::encode::uri_encode;
use mskauth_sigv4::signer::{ALGORITHM, build_signature};
use mskauth_sigv4::timestamp::SigningTimestamp;

/// Service name the SASL signature is scoped to.
pub const SASL_SERVICE: &str = "kafka-cluster";

/// The IAM action the payload authorizes.
pub const SASL_ACTION: &str = "kafka-cluster:Connect";

/// Payload format version expected by the broker.
pub const PAYLOAD_VERSION: &str = "2020_10_22";

/// User agent reported in the payload. Brokers and audit tooling key on
/// this exact string for `AWS_MSK_IAM` clients.
pub const USER_AGENT: &str = "librdkafka";

/// Signature validity advertised in the payload, in seconds.
const EXPIRES_SEC: &str = "900";

const SIGNED_HEADERS: &str = "host";

#[derive(Serialize)]
struct SaslPayload<'a> {
    version: &'a str,
    host: &'a str,
    #[serde(rename = "user-agent")]
    user_agent: &'a str,
    action: &'a str,
    #[serde(rename = "x-amz-algorithm")]
    algorithm: &'a str,
    #[serde(rename = "x-amz-credential")]
    credential: &'a str,
    #[serde(rename = "x-amz-date")]
    date: &'a str,
    #[serde(rename = "x-amz-security-token", skip_serializing_if = "Option::is_none")]
    security_token: Option<&'a str>,
    #[serde(rename = "x-amz-signedheaders")]
    signed_headers: &'a str,
    #[serde(rename = "x-amz-expires")]
    expires: &'a str,
    #[serde(rename = "x-amz-signature")]
    signature: &'a str,
}

/// Build the canonical query string for the `kafka-cluster:Connect` GET.
///
/// The parameter order is fixed by the broker's verifier; values are
/// URI-encoded, keys and separators are not.
#[must_use]
pub fn build_sasl_canonical_query_string(
    access_key_id: &str,
    region: &str,
    ts: &SigningTimestamp,
    session_token: Option<&str>,
) -> String {
    let scope = credential_scope(ts.ymd(), region, SASL_SERVICE);
    let credential = format!("{access_key_id}/{scope}");

    let mut query = format!(
        "Action={}&X-Amz-Algorithm={ALGORITHM}&X-Amz-Credential={}&X-Amz-Date={}&X-Amz-Expires={EXPIRES_SEC}&",
        uri_encode(SASL_ACTION),
        uri_encode(&credential),
        uri_encode(&ts.amz_date()),
    );
    if let Some(token) = session_token {
        query.push_str("X-Amz-Security-Token=");
        query.push_str(&uri_encode(token));
        query.push('&');
    }
    query.push_str("X-Amz-SignedHeaders=host");
    query
}

/// Build the signed JSON payload for one authentication attempt.
///
/// The credential snapshot and the broker hostname are the only per-attempt
/// inputs; everything else is derived from the given timestamp.
#[must_use]
pub fn build_sasl_payload(credential: &Credential, hostname: &str, ts: &SigningTimestamp) -> String {
    let region = credential.region.as_str();
    let session_token = credential.session_token.as_deref();

    let canonical_query_string = build_sasl_canonical_query_string(
        &credential.access_key_id,
        region,
        ts,
        session_token,
    );
    let headers = canonical_headers(&[("host", hostname)]);
    let canonical_request =
        build_canonical_request("GET", &canonical_query_string, &headers, SIGNED_HEADERS, b"");
    debug!(canonical_request, "built SASL canonical request");

    let scope = credential_scope(ts.ymd(), region, SASL_SERVICE);
    let amz_date = ts.amz_date();
    let string_to_sign = build_string_to_sign(&amz_date, &scope, &canonical_request);
    debug!(string_to_sign, "built SASL string to sign");

    let signature = build_signature(
        &credential.secret_access_key,
        ts.ymd(),
        region,
        SASL_SERVICE,
        &string_to_sign,
    );

    let credential_field = format!("{}/{scope}", credential.access_key_id);
    let payload = SaslPayload {
        version: PAYLOAD_VERSION,
        host: hostname,
        user_agent: USER_AGENT,
        action: SASL_ACTION,
        algorithm: ALGORITHM,
        credential: &credential_field,
        date: &amz_date,
        security_token: session_token,
        signed_headers: SIGNED_HEADERS,
        expires: EXPIRES_SEC,
        signature: &signature,
    };

    serde_json::to_string(&payload).expect("SASL payload serialization cannot fail")
}
