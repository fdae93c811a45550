//! CLI-owned configuration: TOML profiles and credential resolution.
//!
//! The library never sees these types — it receives a pre-built
//! `ClientConfig`. Credential resolution order: CLI flag / env var,
//! profile's password_env, system keyring, plaintext in the config file,
//! interactive prompt.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use tapocam_api::{ClientConfig, Credentials, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when --profile is not specified.
    pub default_profile: Option<String>,

    /// Named camera profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Camera host (IP or hostname), or a full https:// base URL.
    pub host: String,

    /// Camera account username.
    pub username: String,

    /// Camera account password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// TP-Link cloud account password, if privileged calls are needed.
    pub cloud_password: Option<String>,

    /// Override request timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tapocam", "tapocam")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("tapocam");
            p.push("config.toml");
            p
        })
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("TAPOCAM_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

// ── ClientConfig resolution ──────────────────────────────────────────

/// Build a `ClientConfig` from the config file, profile, and CLI flags.
///
/// This is the single boundary where CLI config types cross into the
/// library's types.
pub fn resolve(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let config = load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profiles.get(&profile_name);

    // 1. Host (flag / env > profile)
    let host = global
        .host
        .as_deref()
        .or(profile.map(|p| p.host.as_str()))
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let base_url = parse_host(host)?;

    // 2. Username (flag / env > profile)
    let username = global
        .username
        .as_deref()
        .or(profile.map(|p| p.username.as_str()))
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?
        .to_owned();

    // 3. Password chain
    let password = resolve_password(global, profile, &profile_name, &username)?;

    // 4. Cloud password (env > profile; empty is valid and still hashed)
    let cloud_password = std::env::var("TAPO_CLOUD_PASSWORD")
        .ok()
        .or_else(|| profile.and_then(|p| p.cloud_password.clone()))
        .unwrap_or_default();

    // 5. Timeout (flag default is 10; profile only wins over the default)
    let timeout = if global.timeout != 10 {
        global.timeout
    } else {
        profile.and_then(|p| p.timeout).unwrap_or(global.timeout)
    };

    Ok(ClientConfig {
        base_url,
        credentials: Credentials {
            username,
            password,
            cloud_password: SecretString::from(cloud_password),
        },
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout),
            ..TransportConfig::default()
        },
    })
}

/// Accept a bare host (`192.168.1.50`) or a full base URL.
fn parse_host(host: &str) -> Result<Url, CliError> {
    let url_str = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    };

    url_str.parse().map_err(|_| CliError::Validation {
        field: "host".into(),
        reason: format!("invalid host: {host}"),
    })
}

fn resolve_password(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    profile_name: &str,
    username: &str,
) -> Result<SecretString, CliError> {
    // 1. CLI flag or TAPO_PASSWORD env (clap wires the env var)
    if let Some(ref pw) = global.password {
        return Ok(SecretString::from(pw.clone()));
    }

    // 2. Profile's password_env -> env var lookup
    if let Some(env_name) = profile.and_then(|p| p.password_env.as_deref()) {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("tapocam", &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 4. Plaintext in config
    if let Some(pw) = profile.and_then(|p| p.password.clone()) {
        return Ok(SecretString::from(pw));
    }

    // 5. Interactive prompt
    if let Ok(pw) = rpassword::prompt_password(format!("Password for {username}: ")) {
        if !pw.is_empty() {
            return Ok(SecretString::from(pw));
        }
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}
