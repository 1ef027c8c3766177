//! # sber-qr
//!
//! A Rust client for the Sberbank SBP QR order API: OAuth2 client-credentials
//! over mutual TLS, order creation, and order status queries.
//!
//! The gateway authenticates callers twice on every operation: the connection
//! itself is mutually authenticated with a PKCS#12 client certificate, and
//! each operation carries a short-lived bearer token scoped to that specific
//! operation. This crate implements that lifecycle end to end and maps the
//! two domain operations onto it.
//!
//! ## Features
//!
//! - **Per-operation tokens**: every call fetches a fresh token with the
//!   operation's scope URI; nothing is cached
//! - **Mutual TLS**: the client certificate is attached to every outbound
//!   request; file-backed material is re-read per request
//! - **Correlation IDs**: a token request and its dependent order request
//!   share one RqUID for end-to-end tracing in gateway logs
//! - **Typed wire contract**: request bodies are built from typed structures,
//!   so no field can silently drift or disappear
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sber_qr::{ClientConfig, CreateOrderParams, OrderStatusArgs, Pkcs12Source, SberQrClient};
//! use serde_json::json;
//!
//! # async fn example() -> sber_qr::Result<()> {
//! let config = ClientConfig::new(
//!     "my-client-id",
//!     "my-client-secret",
//!     Pkcs12Source::File("certs/client.p12".into()),
//!     "p12-passphrase",
//!     "00000123",     // member_id
//!     "20000456",     // terminal_id
//!     "100000000111", // sbp_member_id
//! )?;
//!
//! let client = SberQrClient::new(config);
//!
//! let order = client
//!     .create_order(&CreateOrderParams {
//!         order_sum: 150.00, // rubles; sent to the gateway as 15000 kopecks
//!         order_number: "ORD-1".to_string(),
//!         description: "Coffee".to_string(),
//!         currency: "643".to_string(),
//!         order_params_type: json!([]),
//!     })
//!     .await?;
//!
//! let status = client
//!     .get_order_status(&OrderStatusArgs {
//!         order_id: order.order_id,
//!         partner_order_number: "ORD-1".to_string(),
//!     })
//!     .await?;
//!
//! println!("order state: {:?}", status.order_state);
//! # Ok(())
//! # }
//! ```
//!
//! ## Request lifecycle
//!
//! Each order operation performs two sequential network round trips:
//!
//! 1. **Token**: form-encoded POST to the OAuth endpoint with Basic auth and
//!    a fresh RqUID; failures surface as
//!    [`SberQrError::Authentication`](errors::SberQrError::Authentication)
//! 2. **Order request**: JSON POST with `Authorization: Bearer`, reusing the
//!    token's RqUID; failures surface as the operation's own error variant
//!
//! Certificate material that cannot be resolved fails the operation before
//! any network attempt. No retries, no caching, no local order state: every
//! operation either returns a fully-formed gateway response or one error.
//!
//! ## Concurrency
//!
//! [`SberQrClient`] holds only immutable state. Share one instance by
//! reference across tasks; concurrent calls are fully independent. The crate
//! imposes no timeouts — wrap calls in `tokio::time::timeout` if you need a
//! deadline over both round trips.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod errors;
pub mod tls;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use client::{SberQrClient, SCOPE_ORDER_CREATE, SCOPE_ORDER_STATUS};
pub use config::{ClientConfig, Endpoints, ORDER_CREATION_URL, ORDER_STATUS_URL, TOKEN_URL};
pub use errors::{Result, SberQrError};
pub use tls::Pkcs12Source;
pub use types::{
    AccessToken, CreateOrderParams, IssuedToken, OrderCreationRequest, OrderInfo, OrderStatus,
    OrderStatusArgs, OrderStatusRequest, TokenRequest,
};
pub use utils::RqUid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_constants() {
        assert!(TOKEN_URL.starts_with("https://api.sberbank.ru:8443/prod/"));
        assert!(ORDER_CREATION_URL.ends_with("/qr/order/v3/creation"));
        assert!(ORDER_STATUS_URL.ends_with("/qr/order/v3/status"));
    }

    #[test]
    fn test_module_accessibility() {
        let _ = RqUid::generate();
        let _ = Endpoints::default();
        let _ = Pkcs12Source::Der(Vec::new());
    }
}
