//! AssumeRole request construction and signing.
//!
//! The request body is signed (the canonical query string is empty): the
//! body parameters, their order, and the four signed headers are all part of
//! what STS verifies.

use mskauth_sigv4::canonical::{
    build_canonical_request, build_string_to_sign, canonical_headers, credential_scope,
};
use mskauth_sigv4::encode::uri_encode;
use mskauth_sigv4::signer::{authorization_header, build_signature};
use mskauth_sigv4::timestamp::SigningTimestamp;

/// The service name STS requests are scoped to.
pub const STS_SERVICE: &str = "sts";

/// Content type of the form-encoded AssumeRole body.
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Headers signed on every AssumeRole request, in canonical order.
pub const SIGNED_HEADERS: &str = "content-length;content-type;host;x-amz-date";

const ACTION: &str = "AssumeRole";
const API_VERSION: &str = "2011-06-15";

/// Inputs for one AssumeRole request.
#[derive(Debug, Clone)]
pub struct AssumeRoleParams<'a> {
    /// Access key id used to sign the request.
    pub access_key_id: &'a str,
    /// Secret access key used to derive the signing key.
    pub secret_access_key: &'a str,
    /// Region of the credential scope.
    pub region: &'a str,
    /// ARN of the role to assume.
    pub role_arn: &'a str,
    /// Session name attached to the assumed-role session.
    pub role_session_name: &'a str,
    /// Optional external id for cross-account trust policies.
    pub external_id: Option<&'a str>,
    /// Requested credential lifetime in seconds.
    pub duration_sec: u32,
    /// STS endpoint host.
    pub host: &'a str,
}

/// A fully signed AssumeRole request, ready to put on the wire.
#[derive(Debug, Clone)]
pub struct SignedAssumeRole {
    /// Form-encoded request body.
    pub body: String,
    /// `X-Amz-Date` header value.
    pub amz_date: String,
    /// `Authorization` header value.
    pub authorization: String,
}

/// Build the form-encoded body, in the parameter order STS was signed with.
///
/// `RoleArn` and `ExternalId` are URI-encoded; `RoleSessionName` is inserted
/// verbatim (STS restricts it to unreserved characters).
#[must_use]
pub fn build_request_parameters(
    role_arn: &str,
    role_session_name: &str,
    external_id: Option<&str>,
    duration_sec: u32,
) -> String {
    let mut body = format!(
        "Action={ACTION}&DurationSeconds={duration_sec}&RoleArn={}&RoleSessionName={role_session_name}",
        uri_encode(role_arn)
    );
    if let Some(external_id) = external_id {
        body.push_str("&ExternalId=");
        body.push_str(&uri_encode(external_id));
    }
    body.push_str("&Version=");
    body.push_str(API_VERSION);
    body
}

/// Sign an AssumeRole request at the given timestamp.
#[must_use]
pub fn sign_assume_role(params: &AssumeRoleParams<'_>, ts: &SigningTimestamp) -> SignedAssumeRole {
    let body = build_request_parameters(
        params.role_arn,
        params.role_session_name,
        params.external_id,
        params.duration_sec,
    );
    let amz_date = ts.amz_date();

    let content_length = body.len().to_string();
    let headers = canonical_headers(&[
        ("content-length", &content_length),
        ("content-type", CONTENT_TYPE),
        ("host", params.host),
        ("x-amz-date", &amz_date),
    ]);

    let canonical_request =
        build_canonical_request("POST", "", &headers, SIGNED_HEADERS, body.as_bytes());
    tracing::debug!(canonical_request, "built STS canonical request");

    let scope = credential_scope(ts.ymd(), params.region, STS_SERVICE);
    let string_to_sign = build_string_to_sign(&amz_date, &scope, &canonical_request);
    tracing::debug!(string_to_sign, "built STS string to sign");

    let signature = build_signature(
        params.secret_access_key,
        ts.ymd(),
        params.region,
        STS_SERVICE,
        &string_to_sign,
    );
    let authorization =
        authorization_header(params.access_key_id, &scope, SIGNED_HEADERS, &signature);

    SignedAssumeRole {
        body,
        amz_date,
        authorization,
    }
}
