// Response classification.
//
// Every exchange with the camera — login and session-scoped alike — is
// funneled through `classify` so the retry policy in the executor only
// ever engages for a genuine expired-token code, never for transport
// failures or malformed bodies.

use serde_json::Value;

use crate::codes;
use crate::error::Error;

/// Classified device response.
#[derive(Debug)]
pub enum Outcome {
    /// `error_code == 0`. Carries the full response body: login responses
    /// put the token under `result.stok`, "get" responses put module
    /// payloads at the top level next to `error_code`.
    Success(Value),
    /// The device reported an invalid session token. Recoverable by
    /// re-login; the executor retries at most once.
    AuthExpired,
    /// Any other nonzero `error_code`.
    Device(i64),
}

/// Classify a completed HTTP exchange.
///
/// Rules, in order: non-200 status is a transport-level failure and is
/// never inspected further; a body without an integer `error_code` is a
/// protocol failure; then `error_code` decides the outcome.
pub fn classify(status: u16, body: &str) -> Result<Outcome, Error> {
    if status != 200 {
        return Err(Error::Status { status });
    }

    let value: Value = serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Protocol {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })?;

    let Some(code) = value.get("error_code").and_then(Value::as_i64) else {
        return Err(Error::Protocol {
            message: "response has no error_code field".into(),
            body: body.to_owned(),
        });
    };

    match code {
        0 => Ok(Outcome::Success(value)),
        codes::INVALID_STOK => Ok(Outcome::AuthExpired),
        other => Ok(Outcome::Device(other)),
    }
}
