//! The gateway client: token acquisition and the two order operations.
//!
//! Every operation follows the same lifecycle: build a mutually-authenticated
//! HTTP client from the configured PKCS#12 bundle, acquire a bearer token
//! scoped to the operation, then issue the order request reusing the token's
//! correlation ID. Tokens are never cached and no request is retried.

use crate::config::{ClientConfig, Endpoints};
use crate::errors::{Result, SberQrError};
use crate::tls;
use crate::types::{
    AccessToken, CreateOrderParams, IssuedToken, OrderCreationRequest, OrderInfo, OrderStatus,
    OrderStatusArgs, OrderStatusRequest, TokenRequest,
};
use crate::utils::{rq_timestamp_now, RqUid};
use reqwest::header;

/// Scope URI authorizing order creation.
pub const SCOPE_ORDER_CREATE: &str = "https://api.sberbank.ru/order.create";

/// Scope URI authorizing order status queries.
pub const SCOPE_ORDER_STATUS: &str = "https://api.sberbank.ru/order.status";

/// Client for the gateway's QR order API.
///
/// Holds only immutable state, so a single instance can be shared by
/// reference across concurrent tasks; each call generates its own RqUID and
/// fetches its own token.
///
/// # Examples
///
/// ```no_run
/// use sber_qr::{ClientConfig, CreateOrderParams, Pkcs12Source, SberQrClient};
/// use serde_json::json;
///
/// # async fn example() -> sber_qr::Result<()> {
/// let config = ClientConfig::new(
///     "my-client-id",
///     "my-client-secret",
///     Pkcs12Source::File("certs/client.p12".into()),
///     "p12-passphrase",
///     "00000123",
///     "20000456",
///     "100000000111",
/// )?;
///
/// let client = SberQrClient::new(config);
/// let order = client
///     .create_order(&CreateOrderParams {
///         order_sum: 150.00,
///         order_number: "ORD-1".to_string(),
///         description: "Coffee".to_string(),
///         currency: "643".to_string(),
///         order_params_type: json!([]),
///     })
///     .await?;
///
/// println!("created order {}", order.order_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SberQrClient {
    config: ClientConfig,
    endpoints: Endpoints,
}

impl SberQrClient {
    /// Creates a client targeting the production gateway.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            endpoints: Endpoints::default(),
        }
    }

    /// Overrides the gateway endpoints, e.g. to point at a test harness.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// The identity material this client was constructed with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Acquires a short-lived bearer token for the given scope.
    ///
    /// Generates a fresh RqUID and performs a signed form-encoded POST to the
    /// token endpoint. The returned [`IssuedToken`] carries the RqUID so the
    /// dependent order request can reuse it. Network or TLS errors, non-2xx
    /// statuses, and malformed bodies all surface as
    /// [`SberQrError::Authentication`]; certificate resolution failures
    /// surface first as [`SberQrError::CertificateLoad`], before any network
    /// attempt.
    pub async fn get_token(&self, scope: &str) -> Result<IssuedToken> {
        let http = tls::mtls_client(&self.config)?;
        let rq_uid = RqUid::generate();
        let endpoint = &self.endpoints.token_url;

        let failure = |reason: String| SberQrError::Authentication {
            endpoint: endpoint.clone(),
            scope: scope.to_string(),
            rq_uid: rq_uid.as_str().to_string(),
            reason,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(rq_uid = rq_uid.as_str(), scope, "requesting access token");

        let response = http
            .post(endpoint)
            .header(header::ACCEPT, "application/json")
            .header("RqUID", rq_uid.as_str())
            .header(
                header::AUTHORIZATION,
                format!("Basic {}", self.config.encoded_credential()),
            )
            .header("x-ibm-client-id", self.config.client_id())
            .form(&TokenRequest::new(scope))
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failure(format!("status {}: {}", status, body)));
        }

        let token: AccessToken = response
            .json()
            .await
            .map_err(|e| failure(format!("decoding token response: {}", e)))?;

        Ok(IssuedToken { token, rq_uid })
    }

    /// Creates a payment order.
    ///
    /// Acquires a token scoped to order creation, then POSTs the typed
    /// creation body to the creation endpoint under the same RqUID. The
    /// amount is converted from major to minor units and the timestamp is
    /// truncated to whole seconds, both per the gateway contract. On failure
    /// no client-side order state exists; failures in the creation request
    /// itself surface as [`SberQrError::OrderCreation`].
    pub async fn create_order(&self, params: &CreateOrderParams) -> Result<OrderInfo> {
        let issued = self.get_token(SCOPE_ORDER_CREATE).await?;
        let rq_tm = rq_timestamp_now();
        let body = OrderCreationRequest::new(&self.config, params, &issued.rq_uid, &rq_tm);
        let endpoint = &self.endpoints.order_creation_url;

        let failure = |reason: String| SberQrError::OrderCreation {
            endpoint: endpoint.clone(),
            rq_uid: issued.rq_uid.as_str().to_string(),
            reason,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rq_uid = issued.rq_uid.as_str(),
            order_number = %params.order_number,
            "creating order"
        );

        // Certificate material is re-read for the second request by design.
        let http = tls::mtls_client(&self.config)?;

        let response = http
            .post(endpoint)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&issued.token.access_token)
            .header("x-Introspect-RqUID", issued.rq_uid.as_str())
            .header("RqUID", issued.rq_uid.as_str())
            .header("X-IBM-Client-Id", self.config.client_id())
            .json(&body)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failure(format!("status {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| failure(format!("decoding creation response: {}", e)))
    }

    /// Queries the status of a previously created order.
    ///
    /// An idempotent read: every call performs its own token fetch and status
    /// request and returns whatever the gateway reports, with no local
    /// caching or state tracking. Failures in the status request itself
    /// surface as [`SberQrError::StatusQuery`].
    pub async fn get_order_status(&self, args: &OrderStatusArgs) -> Result<OrderStatus> {
        let issued = self.get_token(SCOPE_ORDER_STATUS).await?;
        let rq_tm = rq_timestamp_now();
        let body = OrderStatusRequest::new(&self.config, args, &issued.rq_uid, &rq_tm);
        let endpoint = &self.endpoints.order_status_url;

        let failure = |reason: String| SberQrError::StatusQuery {
            endpoint: endpoint.clone(),
            rq_uid: issued.rq_uid.as_str().to_string(),
            reason,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rq_uid = issued.rq_uid.as_str(),
            order_id = %args.order_id,
            "querying order status"
        );

        let http = tls::mtls_client(&self.config)?;

        let response = http
            .post(endpoint)
            .bearer_auth(&issued.token.access_token)
            .header("x-Introspect-RqUID", issued.rq_uid.as_str())
            .header("RqUID", issued.rq_uid.as_str())
            .header("X-IBM-Client-Id", self.config.client_id())
            .json(&body)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failure(format!("status {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| failure(format!("decoding status response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tls::Pkcs12Source;
    use serde_json::json;

    fn client_with_missing_cert() -> SberQrClient {
        let config = ClientConfig::new(
            "client-1",
            "secret-1",
            Pkcs12Source::File("/nonexistent/client.p12".into()),
            "pass",
            "00000123",
            "20000456",
            "100000000111",
        )
        .unwrap();
        SberQrClient::new(config)
    }

    #[test]
    fn test_scope_constants() {
        assert_eq!(SCOPE_ORDER_CREATE, "https://api.sberbank.ru/order.create");
        assert_eq!(SCOPE_ORDER_STATUS, "https://api.sberbank.ru/order.status");
    }

    #[test]
    fn test_endpoint_override() {
        let client = client_with_missing_cert().with_endpoints(Endpoints {
            token_url: "https://localhost:9443/oauth".to_string(),
            order_creation_url: "https://localhost:9443/creation".to_string(),
            order_status_url: "https://localhost:9443/status".to_string(),
        });
        assert_eq!(client.endpoints.token_url, "https://localhost:9443/oauth");
    }

    #[tokio::test]
    async fn test_get_token_fails_on_missing_cert_before_network() {
        let client = client_with_missing_cert();
        let err = client.get_token(SCOPE_ORDER_CREATE).await.unwrap_err();
        assert!(matches!(err, SberQrError::CertificateLoad(_)));
    }

    #[tokio::test]
    async fn test_create_order_fails_on_missing_cert_before_network() {
        let client = client_with_missing_cert();
        let params = CreateOrderParams {
            order_sum: 150.00,
            order_number: "ORD-1".to_string(),
            description: "Coffee".to_string(),
            currency: "643".to_string(),
            order_params_type: json!([]),
        };

        let err = client.create_order(&params).await.unwrap_err();
        assert!(matches!(err, SberQrError::CertificateLoad(_)));
    }

    #[tokio::test]
    async fn test_get_order_status_fails_on_missing_cert_before_network() {
        let client = client_with_missing_cert();
        let args = OrderStatusArgs {
            order_id: "gw-order-1".to_string(),
            partner_order_number: "774635526639".to_string(),
        };

        let err = client.get_order_status(&args).await.unwrap_err();
        assert!(matches!(err, SberQrError::CertificateLoad(_)));
    }
}
