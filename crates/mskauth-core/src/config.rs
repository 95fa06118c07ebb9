//! Configuration for the SASL `AWS_MSK_IAM` mechanism.
//!
//! Options arrive as dotted `key=value` pairs from the enclosing Kafka
//! client's configuration bag; [`MskAuthConfig::from_options`] interprets the
//! keys this library owns and ignores the rest. Validation of required
//! combinations happens at client construction and is fatal.

use crate::error::{MskAuthError, MskAuthResult};
use crate::types::AwsRegion;

/// Default lifetime requested from STS, in seconds.
pub const DEFAULT_DURATION_SEC: u32 = 900;

/// Default STS endpoint host.
pub const DEFAULT_STS_HOST: &str = "sts.amazonaws.com";

/// TLS material for the STS HTTPS client, as file paths or inline PEM blobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsMaterial {
    /// Client certificate file path.
    pub cert_location: Option<String>,
    /// Client certificate as an inline PEM blob.
    pub cert_pem: Option<String>,
    /// Client private key file path.
    pub key_location: Option<String>,
    /// Client private key as an inline PEM blob.
    pub key_pem: Option<String>,
    /// Passphrase for an encrypted private key.
    pub key_password: Option<String>,
    /// CA bundle file path.
    pub ca_location: Option<String>,
    /// CA bundle as an inline PEM blob.
    pub ca_pem: Option<String>,
}

impl TlsMaterial {
    /// Whether any TLS option was configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self != &Self::default()
    }
}

/// Recognized configuration for SASL `AWS_MSK_IAM` authentication.
#[derive(Debug, Clone)]
pub struct MskAuthConfig {
    /// `aws.access.key.id` (mandatory).
    pub access_key_id: String,
    /// `aws.secret.access.key` (mandatory).
    pub secret_access_key: String,
    /// `aws.region` (mandatory).
    pub region: AwsRegion,
    /// `aws.session.token`: optional static session token.
    pub session_token: Option<String>,
    /// `aws.enable.sts`: when true, the refresh scheduler is active.
    pub enable_sts: bool,
    /// `aws.role.arn`: mandatory when STS is enabled.
    pub role_arn: Option<String>,
    /// `aws.role.session.name`: mandatory when STS is enabled.
    pub role_session_name: Option<String>,
    /// `aws.external.id`: optional.
    pub external_id: Option<String>,
    /// `aws.duration.sec`: credential lifetime requested from STS.
    pub duration_sec: u32,
    /// `aws.sts.host`: regional STS endpoint override.
    pub sts_host: String,
    /// `ssl.*` options passed through to the STS HTTPS client.
    pub tls: TlsMaterial,
}

impl Default for MskAuthConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: AwsRegion::new(""),
            session_token: None,
            enable_sts: false,
            role_arn: None,
            role_session_name: None,
            external_id: None,
            duration_sec: DEFAULT_DURATION_SEC,
            sts_host: DEFAULT_STS_HOST.to_owned(),
            tls: TlsMaterial::default(),
        }
    }
}

impl MskAuthConfig {
    /// Build a configuration from dotted `key=value` option pairs.
    ///
    /// Keys this library does not own are ignored; they belong to the
    /// enclosing Kafka client. Malformed values for owned keys are fatal.
    ///
    /// # Errors
    ///
    /// Returns [`MskAuthError::Config`] if an owned option has a malformed
    /// value (e.g. a non-numeric `aws.duration.sec`).
    pub fn from_options<'a, I>(options: I) -> MskAuthResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();

        for (key, value) in options {
            match key {
                "aws.access.key.id" => config.access_key_id = value.to_owned(),
                "aws.secret.access.key" => config.secret_access_key = value.to_owned(),
                "aws.region" => config.region = AwsRegion::new(value),
                "aws.session.token" => config.session_token = Some(value.to_owned()),
                "aws.enable.sts" => config.enable_sts = parse_bool(key, value)?,
                "aws.role.arn" => config.role_arn = Some(value.to_owned()),
                "aws.role.session.name" => config.role_session_name = Some(value.to_owned()),
                "aws.external.id" => config.external_id = Some(value.to_owned()),
                "aws.duration.sec" => {
                    config.duration_sec = value.parse::<u32>().map_err(|e| {
                        MskAuthError::Config(format!("invalid value for {key}: {e}"))
                    })?;
                }
                "aws.sts.host" => config.sts_host = value.to_owned(),
                "ssl.certificate.location" => config.tls.cert_location = Some(value.to_owned()),
                "ssl.certificate.pem" => config.tls.cert_pem = Some(value.to_owned()),
                "ssl.key.location" => config.tls.key_location = Some(value.to_owned()),
                "ssl.key.pem" => config.tls.key_pem = Some(value.to_owned()),
                "ssl.key.password" => config.tls.key_password = Some(value.to_owned()),
                "ssl.ca.location" => config.tls.ca_location = Some(value.to_owned()),
                "ssl.ca.pem" => config.tls.ca_pem = Some(value.to_owned()),
                _ => {}
            }
        }

        Ok(config)
    }

    /// Validate required option combinations.
    ///
    /// # Errors
    ///
    /// Returns [`MskAuthError::Config`] if the mandatory credential trio is
    /// missing, or if STS mode is enabled without a role ARN and session name,
    /// or with a non-positive duration.
    pub fn validate(&self) -> MskAuthResult<()> {
        if self.access_key_id.is_empty()
            || self.secret_access_key.is_empty()
            || self.region.is_empty()
        {
            return Err(MskAuthError::Config(
                "aws.access.key.id, aws.secret.access.key, and aws.region must be set".to_owned(),
            ));
        }

        if self.enable_sts {
            if self.role_arn.as_deref().is_none_or(str::is_empty)
                || self.role_session_name.as_deref().is_none_or(str::is_empty)
            {
                return Err(MskAuthError::Config(
                    "aws.enable.sts is true but missing aws.role.arn or aws.role.session.name"
                        .to_owned(),
                ));
            }
            if self.duration_sec == 0 {
                return Err(MskAuthError::Config(
                    "aws.duration.sec must be a positive integer when aws.enable.sts is true"
                        .to_owned(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> MskAuthResult<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(MskAuthError::Config(format!(
            "invalid value for {key}: expected true or false, got {value}"
        ))),
    }
}
