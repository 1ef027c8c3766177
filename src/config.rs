//! Client configuration: identity material and gateway endpoints.
//!
//! [`ClientConfig`] holds everything a client instance needs to authenticate:
//! OAuth credentials, the PKCS#12 client certificate, and the merchant
//! identifiers attached to every order request. It is immutable after
//! construction and shared by reference across concurrent operations.

use crate::errors::{Result, SberQrError};
use crate::tls::Pkcs12Source;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Production token endpoint.
pub const TOKEN_URL: &str = "https://api.sberbank.ru:8443/prod/tokens/v2/oauth";

/// Production order-creation endpoint.
pub const ORDER_CREATION_URL: &str = "https://api.sberbank.ru:8443/prod/qr/order/v3/creation";

/// Production order-status endpoint.
pub const ORDER_STATUS_URL: &str = "https://api.sberbank.ru:8443/prod/qr/order/v3/status";

/// Immutable identity material for a client instance.
///
/// # Examples
///
/// ```
/// use sber_qr::{ClientConfig, Pkcs12Source};
///
/// let config = ClientConfig::new(
///     "my-client-id",
///     "my-client-secret",
///     Pkcs12Source::File("certs/client.p12".into()),
///     "p12-passphrase",
///     "00000123",
///     "20000456",
///     "100000000111",
/// )
/// .unwrap();
///
/// assert_eq!(config.client_id(), "my-client-id");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    client_id: String,
    client_secret: String,
    encoded_credential: String,
    pkcs12: Pkcs12Source,
    pkcs12_passphrase: String,
    member_id: String,
    terminal_id: String,
    sbp_member_id: String,
}

impl ClientConfig {
    /// Creates a new configuration, validating required fields.
    ///
    /// Computes `encoded_credential = base64(client_id + ":" + client_secret)`
    /// eagerly; it never changes afterwards. Empty `client_id`,
    /// `client_secret`, or merchant identifiers are rejected here, before any
    /// network call is attempted. The PKCS#12 passphrase may be empty — some
    /// bundles are unprotected.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        pkcs12: Pkcs12Source,
        pkcs12_passphrase: impl Into<String>,
        member_id: impl Into<String>,
        terminal_id: impl Into<String>,
        sbp_member_id: impl Into<String>,
    ) -> Result<Self> {
        let client_id = require(client_id.into(), "client_id")?;
        let client_secret = require(client_secret.into(), "client_secret")?;
        let encoded_credential = BASE64.encode(format!("{}:{}", client_id, client_secret));

        Ok(Self {
            client_id,
            client_secret,
            encoded_credential,
            pkcs12,
            pkcs12_passphrase: pkcs12_passphrase.into(),
            member_id: require(member_id.into(), "member_id")?,
            terminal_id: require(terminal_id.into(), "terminal_id")?,
            sbp_member_id: require(sbp_member_id.into(), "sbp_member_id")?,
        })
    }

    /// OAuth client identifier, also sent as the `x-ibm-client-id` header.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// OAuth client secret.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Base64 of `client_id:client_secret`, used for HTTP Basic auth.
    pub fn encoded_credential(&self) -> &str {
        &self.encoded_credential
    }

    /// PKCS#12 client-certificate source.
    pub fn pkcs12(&self) -> &Pkcs12Source {
        &self.pkcs12
    }

    /// Passphrase protecting the PKCS#12 bundle.
    pub fn pkcs12_passphrase(&self) -> &str {
        &self.pkcs12_passphrase
    }

    /// Merchant member identifier.
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Terminal identifier; sent as `id_qr` on creation and `tid` on status.
    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }

    /// SBP participant identifier of the acquiring bank.
    pub fn sbp_member_id(&self) -> &str {
        &self.sbp_member_id
    }
}

fn require(value: String, field: &str) -> Result<String> {
    if value.is_empty() {
        return Err(SberQrError::Configuration(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(value)
}

/// Gateway endpoint URLs.
///
/// Defaults to the production gateway. Overridable for test harnesses that
/// point the client at a local mock.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// OAuth token endpoint
    pub token_url: String,
    /// Order-creation endpoint
    pub order_creation_url: String,
    /// Order-status endpoint
    pub order_status_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            order_creation_url: ORDER_CREATION_URL.to_string(),
            order_status_url: ORDER_STATUS_URL.to_string(),
        }
    }
}
