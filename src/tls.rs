//! Mutual-TLS transport construction.
//!
//! Every request the crate makes presents the configured PKCS#12 client
//! certificate to the gateway. Certificate material given as a file path is
//! re-read in full on every call; failures surface before any network attempt.

use crate::config::ClientConfig;
use crate::errors::{Result, SberQrError};
use reqwest::{Client, Identity};
use std::fs;
use std::path::PathBuf;

/// Source of the PKCS#12 client-certificate bundle.
///
/// # Examples
///
/// ```
/// use sber_qr::Pkcs12Source;
///
/// let from_bytes = Pkcs12Source::Der(vec![0x30, 0x82]);
/// let from_file = Pkcs12Source::File("certs/client.p12".into());
/// assert!(from_bytes.resolve().is_ok());
/// assert!(from_file.resolve().is_err());
/// ```
#[derive(Debug, Clone)]
pub enum Pkcs12Source {
    /// Raw DER-encoded PKCS#12 bytes, used as-is
    Der(Vec<u8>),
    /// Path to a PKCS#12 file, read in full on every request
    File(PathBuf),
}

impl Pkcs12Source {
    /// Resolves the certificate material to raw bytes.
    ///
    /// `Der` passes through unchanged; `File` reads the file synchronously
    /// with no caching. A read failure surfaces as
    /// [`SberQrError::CertificateLoad`] carrying the path.
    pub fn resolve(&self) -> Result<Vec<u8>> {
        match self {
            Pkcs12Source::Der(bytes) => Ok(bytes.clone()),
            Pkcs12Source::File(path) => fs::read(path).map_err(|e| {
                SberQrError::CertificateLoad(format!("{}: {}", path.display(), e))
            }),
        }
    }
}

/// Builds an HTTP client that presents the configured client certificate.
///
/// Called once per outbound request, so file-backed certificate material is
/// re-read each time. Resolution, PKCS#12 parsing, and TLS setup failures all
/// surface here, before any network attempt.
pub(crate) fn mtls_client(config: &ClientConfig) -> Result<Client> {
    let der = config.pkcs12().resolve()?;
    let identity = Identity::from_pkcs12_der(&der, config.pkcs12_passphrase())
        .map_err(|e| SberQrError::CertificateLoad(format!("parsing PKCS#12 bundle: {}", e)))?;

    Client::builder()
        .identity(identity)
        .use_native_tls()
        .build()
        .map_err(|e| SberQrError::CertificateLoad(format!("building TLS client: {}", e)))
}
