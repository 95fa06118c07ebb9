//! The STS HTTPS client.
//!
//! One outbound call: a signed `AssumeRole` POST. TLS material from the
//! client configuration is applied to the underlying connector; the request
//! timeout turns a hung STS endpoint into a retriable transport failure.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

use mskauth_core::{Credential, Expiry, MskAuthConfig, MskAuthError, TlsMaterial};
use mskauth_sigv4::timestamp::SigningTimestamp;

use crate::request::{AssumeRoleParams, CONTENT_TYPE, sign_assume_role};
use crate::xml::{XmlError, parse_assume_role_response};

/// User agent sent to STS. Brokers and audit tooling key on this exact
/// string for `AWS_MSK_IAM` clients.
pub const USER_AGENT: &str = "librdkafka";

/// Hard ceiling on one AssumeRole round-trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A configured STS `AssumeRole` client.
#[derive(Debug, Clone)]
pub struct StsClient {
    http: reqwest::Client,
    access_key_id: String,
    secret_access_key: String,
    region: String,
    role_arn: String,
    role_session_name: String,
    external_id: Option<String>,
    duration_sec: u32,
    host: String,
}

impl StsClient {
    /// Build an STS client from the validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MskAuthError::Config`] if the role options are missing or
    /// the TLS material cannot be loaded.
    pub fn new(config: &MskAuthConfig) -> Result<Self, MskAuthError> {
        let role_arn = config
            .role_arn
            .clone()
            .ok_or_else(|| MskAuthError::Config("aws.role.arn must be set".to_owned()))?;
        let role_session_name = config.role_session_name.clone().ok_or_else(|| {
            MskAuthError::Config("aws.role.session.name must be set".to_owned())
        })?;

        let http = build_http_client(&config.tls)?;

        Ok(Self {
            http,
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            region: config.region.as_str().to_owned(),
            role_arn,
            role_session_name,
            external_id: config.external_id.clone(),
            duration_sec: config.duration_sec,
            host: config.sts_host.clone(),
        })
    }

    /// Perform one `AssumeRole` call and return the temporary credential.
    ///
    /// The credential's expiry is taken from the response's `Expiration`
    /// field; a response without it fails rather than producing a guessed
    /// lifetime.
    ///
    /// # Errors
    ///
    /// [`MskAuthError::StsTransport`] for connect/TLS/I-O/timeout failures,
    /// [`MskAuthError::StsProtocol`] for `ErrorResponse` documents and
    /// responses missing required fields.
    pub async fn assume_role(&self) -> Result<Credential, MskAuthError> {
        let ts = SigningTimestamp::now();
        let signed = sign_assume_role(
            &AssumeRoleParams {
                access_key_id: &self.access_key_id,
                secret_access_key: &self.secret_access_key,
                region: &self.region,
                role_arn: &self.role_arn,
                role_session_name: &self.role_session_name,
                external_id: self.external_id.as_deref(),
                duration_sec: self.duration_sec,
                host: &self.host,
            },
            &ts,
        );

        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&signed.authorization)
                .map_err(|e| MskAuthError::StsTransport(e.to_string()))?,
        );
        headers.insert(
            "x-amz-date",
            HeaderValue::from_str(&signed.amz_date)
                .map_err(|e| MskAuthError::StsTransport(e.to_string()))?,
        );

        debug!(host = %self.host, "sending AssumeRole request to STS");
        let response = self
            .http
            .post(format!("https://{}/", self.host))
            .headers(headers)
            .body(signed.body)
            .send()
            .await
            .map_err(|e| MskAuthError::StsTransport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| MskAuthError::StsTransport(e.to_string()))?;
        debug!(%status, body_len = body.len(), "received STS response");

        // Error documents arrive with 4xx statuses; the XML walk handles
        // both shapes, so the status code itself is not consulted.
        let sts_credentials = parse_assume_role_response(&body).map_err(|e| match e {
            XmlError::ErrorResponse(message) => MskAuthError::StsProtocol(message),
            other => MskAuthError::StsProtocol(other.to_string()),
        })?;

        let expiry = Expiry::At(sts_credentials.expires_at_unix_ms());
        Ok(Credential {
            access_key_id: sts_credentials.access_key_id,
            secret_access_key: sts_credentials.secret_access_key,
            region: mskauth_core::AwsRegion::new(&self.region),
            session_token: Some(sts_credentials.session_token),
            expiry,
        })
    }
}

/// Build the reqwest client, applying configured TLS material.
fn build_http_client(tls: &TlsMaterial) -> Result<reqwest::Client, MskAuthError> {
    let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);

    if tls.key_password.is_some() {
        return Err(MskAuthError::Config(
            "ssl.key.password is not supported; provide an unencrypted key".to_owned(),
        ));
    }

    let cert_pem = read_material(tls.cert_pem.as_deref(), tls.cert_location.as_deref())?;
    let key_pem = read_material(tls.key_pem.as_deref(), tls.key_location.as_deref())?;
    match (cert_pem, key_pem) {
        (Some(cert), Some(key)) => {
            // reqwest expects the client cert and key in one PEM bundle.
            let mut bundle = cert;
            bundle.push(b'\n');
            bundle.extend_from_slice(&key);
            let identity = reqwest::Identity::from_pem(&bundle)
                .map_err(|e| MskAuthError::Config(format!("invalid client TLS identity: {e}")))?;
            builder = builder.identity(identity);
        }
        (None, None) => {}
        _ => {
            return Err(MskAuthError::Config(
                "ssl client certificate and key must be configured together".to_owned(),
            ));
        }
    }

    if let Some(ca) = read_material(tls.ca_pem.as_deref(), tls.ca_location.as_deref())? {
        let certificate = reqwest::Certificate::from_pem(&ca)
            .map_err(|e| MskAuthError::Config(format!("invalid CA bundle: {e}")))?;
        builder = builder.add_root_certificate(certificate);
    }

    builder
        .build()
        .map_err(|e| MskAuthError::Config(format!("failed to build STS HTTP client: {e}")))
}

/// Resolve inline PEM or a file path into bytes; inline wins when both are set.
fn read_material(pem: Option<&str>, location: Option<&str>) -> Result<Option<Vec<u8>>, MskAuthError> {
    if let Some(pem) = pem {
        return Ok(Some(pem.as_bytes().to_vec()));
    }
    match location {
        Some(path) => std::fs::read(path)
            .map(Some)
            .map_err(|e| MskAuthError::Config(format!("cannot read {path}: {e}"))),
        None => Ok(None),
    }
}
