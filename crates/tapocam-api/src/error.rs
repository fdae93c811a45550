use thiserror::Error;

/// Top-level error type for the `tapocam-api` crate.
///
/// Covers every failure mode of the control protocol: authentication,
/// transport, envelope shape, and device-level rejections. The CLI maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login exchange failed, or the post-refresh retry still reported
    /// an expired session.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered with a non-200 HTTP status.
    #[error("Device returned HTTP {status}")]
    Status { status: u16 },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// Response did not have the expected envelope shape, with the raw
    /// body for debugging.
    #[error("Unexpected response shape: {message}")]
    Protocol { message: String, body: String },

    // ── Device ──────────────────────────────────────────────────────
    /// The device accepted the request but rejected it semantically.
    /// Carries the mapped message and the outbound payload for diagnosis.
    #[error("Device error {code}: {message}")]
    Device {
        code: i64,
        message: String,
        request: String,
    },
}

impl Error {
    /// Returns `true` if this error indicates auth has failed terminally
    /// (bad credentials, or the device rejected a freshly issued token).
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient transport error worth retrying
    /// at a higher layer.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
