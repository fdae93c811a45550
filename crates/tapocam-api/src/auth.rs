// Credential hashing and types.
//
// The camera never sees a plaintext password: login sends an
// uppercase-hex MD5 digest with `hashed: true`. Digests are computed
// once at client construction and reused for every login.

use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};

/// Credentials for authenticating with the camera.
///
/// `cloud_password` is the TP-Link cloud account password, required by
/// some firmware for privileged calls. It may be empty; the empty string
/// still gets hashed, matching the device's expectation.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub cloud_password: SecretString,
}

impl Credentials {
    /// Credentials with no cloud password.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
            cloud_password: SecretString::from(String::new()),
        }
    }
}

/// Digests derived from [`Credentials`] at setup time.
///
/// Only the hashed forms cross the wire; this type intentionally does not
/// hold the plaintext.
#[derive(Debug, Clone)]
pub(crate) struct HashedCredentials {
    pub username: String,
    pub password: String,
    #[allow(dead_code)] // consumed by privileged calls on newer firmware
    pub cloud_password: String,
}

impl From<&Credentials> for HashedCredentials {
    fn from(credentials: &Credentials) -> Self {
        Self {
            username: credentials.username.clone(),
            password: hash_secret(credentials.password.expose_secret()),
            cloud_password: hash_secret(credentials.cloud_password.expose_secret()),
        }
    }
}

/// Uppercase-hex MD5 digest over the secret's UTF-8 bytes.
///
/// Deterministic and pure; always returns 32 hex characters.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    hex::encode_upper(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_uppercase_hex() {
        let a = hash_secret("hunter2");
        let b = hash_secret("hunter2");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn empty_secret_hashes_to_empty_string_digest() {
        // MD5("") — the cloud password is hashed even when unset.
        assert_eq!(hash_secret(""), "D41D8CD98F00B204E9800998ECF8427E");
    }

    #[test]
    fn known_digest() {
        assert_eq!(hash_secret("abc"), "900150983CD24FB0D6963F7D28E17F72");
    }

    #[test]
    fn derives_both_digests_at_setup() {
        let credentials = Credentials {
            username: "admin".into(),
            password: SecretString::from("abc".to_string()),
            cloud_password: SecretString::from(String::new()),
        };
        let hashed = HashedCredentials::from(&credentials);
        assert_eq!(hashed.username, "admin");
        assert_eq!(hashed.password, "900150983CD24FB0D6963F7D28E17F72");
        assert_eq!(hashed.cloud_password, "D41D8CD98F00B204E9800998ECF8427E");
    }
}
