//! CLI error types with miette diagnostics.
//!
//! Maps `tapocam_api::Error` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const DEVICE: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the camera")]
    #[diagnostic(
        code(tapocam::connection_failed),
        help(
            "Check that the camera is powered on and reachable on the local network.\n\
             Cameras only accept connections from the same LAN segment."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Camera returned HTTP {status}")]
    #[diagnostic(code(tapocam::http_error))]
    Http { status: u16 },

    #[error("TLS error: {message}")]
    #[diagnostic(code(tapocam::tls_error))]
    Tls { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tapocam::auth_failed),
        help(
            "Verify the camera account credentials.\n\
             The camera account is set in the Tapo app under\n\
             Camera Settings > Advanced Settings > Camera Account."
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(tapocam::no_credentials),
        help(
            "Configure credentials with: tapocam config init\n\
             Or set the TAPO_USERNAME and TAPO_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Camera rejected the request ({code}): {message}")]
    #[diagnostic(code(tapocam::device_error))]
    DeviceRejected { code: i64, message: String },

    #[error("Unexpected response from the camera: {message}")]
    #[diagnostic(
        code(tapocam::protocol_error),
        help("This usually indicates a firmware version this tool does not know.")
    )]
    Protocol { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tapocam::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No camera host configured")]
    #[diagnostic(
        code(tapocam::no_config),
        help(
            "Pass --host, set TAPO_HOST, or create a profile with: tapocam config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(tapocam::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(tapocam::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Aborted { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(tapocam::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Http { .. } | Self::Tls { .. } => {
                exit_code::CONNECTION
            }
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::DeviceRejected { .. } | Self::Protocol { .. } => exit_code::DEVICE,
            Self::Validation { .. } | Self::Aborted { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── tapocam_api::Error → CliError mapping ────────────────────────────

impl From<tapocam_api::Error> for CliError {
    fn from(err: tapocam_api::Error) -> Self {
        use tapocam_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => Self::AuthFailed { message },
            ApiError::Transport(e) => Self::ConnectionFailed { source: e.into() },
            ApiError::Status { status } => Self::Http { status },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            ApiError::Tls(message) => Self::Tls { message },
            ApiError::Protocol { message, body: _ } => Self::Protocol { message },
            ApiError::Device { code, message, request: _ } => {
                Self::DeviceRejected { code, message }
            }
        }
    }
}
