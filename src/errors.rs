//! Error types for the sber-qr library.
//!
//! Every public operation either returns a fully-formed result or exactly one
//! of these errors; nothing is caught or retried internally. Variants carry
//! the endpoint, scope, and RqUID needed to correlate a failure with the
//! gateway-side request logs.

use thiserror::Error;

/// Main error type for gateway operations.
#[derive(Error, Debug)]
pub enum SberQrError {
    /// Missing or invalid construction-time configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O or parse failure resolving the PKCS#12 client certificate
    #[error("certificate load error: {0}")]
    CertificateLoad(String),

    /// Token endpoint unreachable, returned non-2xx, or returned a
    /// malformed body
    #[error("authentication failed at {endpoint} (scope {scope}, rq_uid {rq_uid}): {reason}")]
    Authentication {
        /// Token endpoint URL the request was sent to
        endpoint: String,
        /// Scope string the token was requested for
        scope: String,
        /// Correlation ID of the failed request
        rq_uid: String,
        /// Underlying transport or parse failure
        reason: String,
    },

    /// Order-creation endpoint unreachable, returned non-2xx, or returned a
    /// malformed body
    #[error("order creation failed at {endpoint} (rq_uid {rq_uid}): {reason}")]
    OrderCreation {
        /// Creation endpoint URL the request was sent to
        endpoint: String,
        /// Correlation ID shared by the token and creation requests
        rq_uid: String,
        /// Underlying transport or parse failure
        reason: String,
    },

    /// Order-status endpoint unreachable, returned non-2xx, or returned a
    /// malformed body
    #[error("order status query failed at {endpoint} (rq_uid {rq_uid}): {reason}")]
    StatusQuery {
        /// Status endpoint URL the request was sent to
        endpoint: String,
        /// Correlation ID shared by the token and status requests
        rq_uid: String,
        /// Underlying transport or parse failure
        reason: String,
    },
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, SberQrError>;
