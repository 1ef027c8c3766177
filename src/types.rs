//! Typed request and response structures for the gateway wire contract.
//!
//! Request bodies are built explicitly from the client configuration and
//! caller parameters so no field can be silently dropped or renamed. Response
//! structures pull out the fields this crate needs and pass every other
//! gateway-defined field through verbatim via flattened maps.

use crate::config::ClientConfig;
use crate::utils::{to_minor_units, RqUid};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Form body for the OAuth client-credentials token request.
#[derive(Serialize, Debug, Clone)]
pub struct TokenRequest<'a> {
    /// Always `client_credentials`
    pub grant_type: &'a str,

    /// Scope URI identifying the operation the token authorizes
    pub scope: &'a str,
}

impl<'a> TokenRequest<'a> {
    /// Builds a client-credentials token request for the given scope.
    pub fn new(scope: &'a str) -> Self {
        Self {
            grant_type: "client_credentials",
            scope,
        }
    }
}

/// Bearer token returned by the gateway's OAuth endpoint.
///
/// Only `access_token` is interpreted; every other gateway-defined field
/// (expiry, token type, ...) is carried through untouched. Tokens are never
/// cached — each operation fetches its own.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccessToken {
    /// The bearer token value
    pub access_token: String,

    /// Remaining gateway-defined fields, passed through verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A freshly acquired token together with the RqUID used to request it.
///
/// The RqUID is reused on the dependent order request so both calls of one
/// logical operation trace under a single correlation ID.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The parsed token response
    pub token: AccessToken,

    /// Correlation ID the token was requested under
    pub rq_uid: RqUid,
}

/// Caller-supplied parameters for order creation.
///
/// `order_sum` is in major currency units (rubles); the wire request carries
/// minor units (kopecks).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateOrderParams {
    /// Order amount in major currency units
    pub order_sum: f64,

    /// Merchant-assigned order number
    pub order_number: String,

    /// Human-readable order description
    pub description: String,

    /// ISO 4217 numeric currency code (e.g. "643" for RUB)
    pub currency: String,

    /// Gateway-defined order parameters block, passed through verbatim
    pub order_params_type: Value,
}

/// Wire body for the order-creation endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderCreationRequest {
    /// Correlation ID, shared with the preceding token request
    pub rq_uid: String,

    /// Request timestamp, whole seconds, UTC
    pub rq_tm: String,

    /// Merchant member identifier
    pub member_id: String,

    /// Merchant-assigned order number
    pub order_number: String,

    /// Order creation timestamp (same instant as `rq_tm`)
    pub order_create_date: String,

    /// Gateway-defined order parameters block
    pub order_params_type: Value,

    /// QR terminal identifier, derived from the configured terminal
    pub id_qr: String,

    /// Order amount in minor currency units
    pub order_sum: i64,

    /// ISO 4217 numeric currency code
    pub currency: String,

    /// Human-readable order description
    pub description: String,

    /// SBP participant identifier of the acquiring bank
    pub sbp_member_id: String,
}

impl OrderCreationRequest {
    /// Builds the creation body from configuration and caller parameters.
    ///
    /// Converts `order_sum` from major to minor units and derives `id_qr`
    /// from the configured terminal identifier.
    pub fn new(
        config: &ClientConfig,
        params: &CreateOrderParams,
        rq_uid: &RqUid,
        rq_tm: &str,
    ) -> Self {
        Self {
            rq_uid: rq_uid.as_str().to_string(),
            rq_tm: rq_tm.to_string(),
            member_id: config.member_id().to_string(),
            order_number: params.order_number.clone(),
            order_create_date: rq_tm.to_string(),
            order_params_type: params.order_params_type.clone(),
            id_qr: config.terminal_id().to_string(),
            order_sum: to_minor_units(params.order_sum),
            currency: params.currency.clone(),
            description: params.description.clone(),
            sbp_member_id: config.sbp_member_id().to_string(),
        }
    }
}

/// Gateway response to order creation.
///
/// `order_id` is the gateway-assigned identifier used for later status
/// queries; everything else passes through verbatim.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderInfo {
    /// Gateway-assigned order identifier
    pub order_id: String,

    /// Remaining gateway-defined fields, passed through verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller-supplied arguments for an order status query.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderStatusArgs {
    /// Gateway-assigned order identifier from [`OrderInfo`]
    pub order_id: String,

    /// Partner-side order number
    pub partner_order_number: String,
}

/// Wire body for the order-status endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderStatusRequest {
    /// Correlation ID, shared with the preceding token request
    pub rq_uid: String,

    /// Request timestamp, whole seconds, UTC
    pub rq_tm: String,

    /// Gateway-assigned order identifier
    pub order_id: String,

    /// Terminal identifier; the gateway expects the wire name `tid`
    #[serde(rename = "tid")]
    pub terminal_id: String,

    /// Partner-side order number
    pub partner_order_number: String,
}

impl OrderStatusRequest {
    /// Builds the status body from configuration and caller arguments.
    pub fn new(
        config: &ClientConfig,
        args: &OrderStatusArgs,
        rq_uid: &RqUid,
        rq_tm: &str,
    ) -> Self {
        Self {
            rq_uid: rq_uid.as_str().to_string(),
            rq_tm: rq_tm.to_string(),
            order_id: args.order_id.clone(),
            terminal_id: config.terminal_id().to_string(),
            partner_order_number: args.partner_order_number.clone(),
        }
    }
}

/// Gateway response to a status query.
///
/// Order states (paid, pending, expired, ...) are defined entirely by the
/// gateway; this crate does no local state tracking and returns whatever the
/// gateway reports.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderStatus {
    /// Gateway-assigned order identifier, when echoed back
    pub order_id: Option<String>,

    /// Gateway-reported order state, when present
    pub order_state: Option<String>,

    /// Remaining gateway-defined fields, passed through verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tls::Pkcs12Source;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new(
            "client-1",
            "secret-1",
            Pkcs12Source::Der(vec![0x30]),
            "pass",
            "00000123",
            "20000456",
            "100000000111",
        )
        .unwrap()
    }

    #[test]
    fn test_creation_request_converts_sum_to_minor_units() {
        let params = CreateOrderParams {
            order_sum: 150.00,
            order_number: "ORD-1".to_string(),
            description: "Coffee".to_string(),
            currency: "643".to_string(),
            order_params_type: json!([]),
        };

        let rq_uid = RqUid::generate();
        let request = OrderCreationRequest::new(&config(), &params, &rq_uid, "2024-03-01T10:15:30Z");

        assert_eq!(request.order_sum, 15000);
        assert_eq!(request.rq_uid, rq_uid.as_str());
        assert_eq!(request.rq_tm, "2024-03-01T10:15:30Z");
        assert_eq!(request.order_create_date, "2024-03-01T10:15:30Z");
    }

    #[test]
    fn test_creation_request_derives_id_qr_from_terminal() {
        let params = CreateOrderParams {
            order_sum: 1.0,
            order_number: "ORD-2".to_string(),
            description: "Tea".to_string(),
            currency: "643".to_string(),
            order_params_type: json!([]),
        };

        let request =
            OrderCreationRequest::new(&config(), &params, &RqUid::generate(), "2024-03-01T10:15:30Z");

        assert_eq!(request.id_qr, "20000456");
        assert_eq!(request.member_id, "00000123");
        assert_eq!(request.sbp_member_id, "100000000111");
    }

    #[test]
    fn test_status_request_renames_terminal_to_tid() {
        let args = OrderStatusArgs {
            order_id: "gw-order-1".to_string(),
            partner_order_number: "774635526639".to_string(),
        };

        let request =
            OrderStatusRequest::new(&config(), &args, &RqUid::generate(), "2024-03-01T10:15:30Z");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["tid"], "20000456");
        assert!(json.get("terminal_id").is_none());
        assert_eq!(json["order_id"], "gw-order-1");
        assert_eq!(json["partner_order_number"], "774635526639");
    }

    #[test]
    fn test_token_request_grant_type_is_fixed() {
        let request = TokenRequest::new("https://api.sberbank.ru/order.create");
        assert_eq!(request.grant_type, "client_credentials");
    }

    #[test]
    fn test_access_token_preserves_extra_fields() {
        let token: AccessToken = serde_json::from_value(json!({
            "access_token": "tok-1",
            "token_type": "Bearer",
            "expires_in": 3600
        }))
        .unwrap();

        assert_eq!(token.access_token, "tok-1");
        assert_eq!(token.extra["token_type"], "Bearer");
        assert_eq!(token.extra["expires_in"], 3600);
    }

    #[test]
    fn test_order_info_passes_gateway_fields_through() {
        let info: OrderInfo = serde_json::from_value(json!({
            "order_id": "gw-order-1",
            "order_form_url": "https://example.test/qr.png",
            "error_code": "0"
        }))
        .unwrap();

        assert_eq!(info.order_id, "gw-order-1");
        assert_eq!(info.extra["order_form_url"], "https://example.test/qr.png");
    }

    #[test]
    fn test_order_status_is_opaque_passthrough() {
        let status: OrderStatus = serde_json::from_value(json!({
            "order_id": "gw-order-1",
            "order_state": "PAID",
            "order_operation_params": [{"operation_id": "op-1"}]
        }))
        .unwrap();

        assert_eq!(status.order_state.as_deref(), Some("PAID"));
        assert!(status.extra.contains_key("order_operation_params"));
    }
}
