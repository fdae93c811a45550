// Tapo camera HTTP client.
//
// Owns the transport, the device base URL, and the session state, and
// drives the request-execution protocol: ensure a token exists, send to
// the token-addressed endpoint, classify, and re-login + retry exactly
// once when the device reports an expired token.

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, HashedCredentials};
use crate::codes;
use crate::error::Error;
use crate::protocol::{self, Outcome};
use crate::session::SessionManager;
use crate::transport::TransportConfig;

/// Everything needed to construct a [`TapoClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Device root, e.g. `https://192.168.1.50`.
    pub base_url: Url,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

/// Client for a single Tapo camera.
///
/// One logical session per instance. All control traffic goes through
/// [`execute`](Self::execute); the typed operations (`get_info`, `set`,
/// `perform`) are thin envelope builders on top of it.
pub struct TapoClient {
    http: reqwest::Client,
    base_url: Url,
    referer: String,
    session: SessionManager,
}

impl TapoClient {
    /// Create a new client from a [`ClientConfig`].
    ///
    /// Hashes the credentials once up front. Does not talk to the device;
    /// login happens lazily on the first request.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self::with_client(http, config.base_url, &config.credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when you need custom transport behavior (or a plain-HTTP
    /// endpoint in tests).
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: &Credentials) -> Self {
        let referer = base_url.as_str().trim_end_matches('/').to_owned();
        Self {
            http,
            base_url,
            referer,
            session: SessionManager::new(HashedCredentials::from(credentials)),
        }
    }

    /// The device root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session state (for inspecting or pre-warming the token).
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Log in now instead of lazily on the first request.
    pub async fn login(&self) -> Result<(), Error> {
        self.session
            .login(&self.http, &self.base_url, &self.referer)
            .await?;
        Ok(())
    }

    /// Build the session-scoped endpoint for a token.
    ///
    /// The token is embedded in the path, so the URL is rebuilt from the
    /// current token value on every attempt — a refreshed token means a
    /// new destination, not just a new header.
    fn ds_url(&self, token: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/stok={token}/ds")).map_err(Error::InvalidUrl)
    }

    /// Send a command envelope to the session-scoped endpoint.
    ///
    /// Returns the full response body on success. On an expired-token
    /// response the session is refreshed (drop-and-relogin) and the
    /// request is rebuilt and resent once; a second expiry is terminal.
    /// Transport, protocol, and device-semantic failures propagate
    /// without any retry.
    pub async fn execute(&self, body: &Value) -> Result<Value, Error> {
        let mut retried = false;

        loop {
            let token = self
                .session
                .ensure(&self.http, &self.base_url, &self.referer)
                .await?;
            let url = self.ds_url(&token)?;

            debug!("POST {}", url);

            let resp = self
                .http
                .post(url)
                .header(reqwest::header::REFERER, &self.referer)
                .json(body)
                .send()
                .await
                .map_err(Error::Transport)?;

            let status = resp.status().as_u16();
            let text = resp.text().await.map_err(Error::Transport)?;

            match protocol::classify(status, &text)? {
                Outcome::Success(value) => return Ok(value),
                Outcome::AuthExpired if !retried => {
                    debug!("session token rejected, refreshing and retrying once");
                    retried = true;
                    self.session.invalidate().await;
                    self.session
                        .login(&self.http, &self.base_url, &self.referer)
                        .await?;
                }
                Outcome::AuthExpired => {
                    return Err(Error::Authentication {
                        message: "session token rejected again after refresh".into(),
                    });
                }
                Outcome::Device(code) => {
                    return Err(Error::Device {
                        code,
                        message: codes::describe(code),
                        request: body.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn client() -> TapoClient {
        let credentials = Credentials::new("admin", SecretString::from("pw".to_string()));
        #[allow(clippy::unwrap_used)]
        let base_url = Url::parse("https://192.168.1.50").unwrap();
        TapoClient::with_client(reqwest::Client::new(), base_url, &credentials)
    }

    #[test]
    fn ds_url_embeds_the_token() {
        let client = client();
        #[allow(clippy::unwrap_used)]
        let url = client.ds_url("abc123").unwrap();
        assert_eq!(url.as_str(), "https://192.168.1.50/stok=abc123/ds");
    }

    #[test]
    fn referer_has_no_trailing_slash() {
        assert_eq!(client().referer, "https://192.168.1.50");
    }
}
