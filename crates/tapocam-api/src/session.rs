// Session token lifecycle.
//
// The camera issues an opaque short-lived token ("stok") from the login
// exchange. There is no client-visible expiry: validity is discovered by
// a request failing with the invalid-stok code, at which point the
// executor drops the token and logs in again.

use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::auth::HashedCredentials;
use crate::codes;
use crate::error::Error;
use crate::protocol::{self, Outcome};

/// Owns the single mutable token slot and performs the login exchange.
///
/// At most one token is active at a time; a successful login replaces
/// the slot in place. A failed login never installs a token, so
/// [`ensure`](Self::ensure) will attempt a fresh login on the next call.
pub struct SessionManager {
    credentials: HashedCredentials,
    token: RwLock<Option<String>>,
}

impl SessionManager {
    pub(crate) fn new(credentials: HashedCredentials) -> Self {
        Self {
            credentials,
            token: RwLock::new(None),
        }
    }

    /// The current token, if any. Cloned out so readers never hold the
    /// lock across a network call.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Drop the current token. Refresh is modeled as drop-then-reacquire;
    /// there is no partial state.
    pub(crate) async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    /// Return the stored token, logging in first if the slot is empty.
    pub(crate) async fn ensure(
        &self,
        http: &reqwest::Client,
        base_url: &Url,
        referer: &str,
    ) -> Result<String, Error> {
        if let Some(token) = self.token().await {
            return Ok(token);
        }
        self.login(http, base_url, referer).await
    }

    /// Perform one login exchange against the device root endpoint.
    ///
    /// On a classified success the token from `result.stok` is stored and
    /// returned. Every classified failure — non-200 status, nonzero
    /// `error_code`, malformed result — maps to `Error::Authentication`
    /// and leaves the slot empty. Network-level send failures surface as
    /// `Error::Transport`. One attempt per call; no internal retry.
    pub(crate) async fn login(
        &self,
        http: &reqwest::Client,
        base_url: &Url,
        referer: &str,
    ) -> Result<String, Error> {
        debug!("logging in at {}", base_url);

        let body = json!({
            "method": "login",
            "params": {
                "hashed": true,
                "password": self.credentials.password,
                "username": self.credentials.username,
            },
        });

        let resp = http
            .post(base_url.clone())
            .header(reqwest::header::REFERER, referer)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(Error::Transport)?;

        let outcome = protocol::classify(status, &text).map_err(|e| Error::Authentication {
            message: format!("login exchange failed: {e}"),
        })?;

        let value = match outcome {
            Outcome::Success(value) => value,
            Outcome::AuthExpired => {
                return Err(Error::Authentication {
                    message: "login rejected: invalid authentication data".into(),
                });
            }
            Outcome::Device(code) => {
                return Err(Error::Authentication {
                    message: format!("login rejected: {}", codes::describe(code)),
                });
            }
        };

        let Some(stok) = value
            .pointer("/result/stok")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        else {
            return Err(Error::Authentication {
                message: "login response has no result.stok".into(),
            });
        };

        *self.token.write().await = Some(stok.to_owned());
        debug!("login successful");
        Ok(stok.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, HashedCredentials};
    use secrecy::SecretString;

    fn manager() -> SessionManager {
        let credentials = Credentials::new("admin", SecretString::from("pw".to_string()));
        SessionManager::new(HashedCredentials::from(&credentials))
    }

    #[tokio::test]
    async fn starts_unauthenticated() {
        assert_eq!(manager().token().await, None);
    }

    #[tokio::test]
    async fn invalidate_clears_the_slot() {
        let session = manager();
        *session.token.write().await = Some("abc".into());
        session.invalidate().await;
        assert_eq!(session.token().await, None);
    }
}
