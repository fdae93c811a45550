// Transport configuration for building reqwest::Client instances.
//
// The camera speaks HTTPS with a self-signed certificate and expects a
// fixed set of headers identifying the official mobile app, so the
// builder logic lives here rather than in the client.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONNECTION};

use crate::error::Error;

/// TLS verification mode.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate. This is the default: Tapo cameras ship
    /// with self-signed certificates.
    DangerAcceptInvalid,
}

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// Applies the fixed device headers on every request. The camera's
    /// firmware rejects requests that don't look like the official app,
    /// and expects the connection to be closed after each exchange.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("Tapo CameraClient Android")
            .default_headers(device_headers());

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// The fixed headers the camera expects on every request.
fn device_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    headers.insert(
        HeaderName::from_static("requestbyapp"),
        HeaderValue::from_static("true"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_relaxed_tls_with_short_timeout() {
        let config = TransportConfig::default();
        assert!(matches!(config.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn builds_client_with_device_headers() {
        let config = TransportConfig::default();
        assert!(config.build_client().is_ok());

        let headers = device_headers();
        assert_eq!(headers.get("requestbyapp").map(|v| v.as_bytes()), Some(&b"true"[..]));
        assert_eq!(headers.get(CONNECTION).map(|v| v.as_bytes()), Some(&b"close"[..]));
    }
}
