//! `config` command handlers. These never touch the camera.

use std::fs;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { name, host, username } => init(&name, host, username, global),
        ConfigCommand::Show => show(),
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

/// Create or update a profile in the config file.
///
/// Passwords are deliberately not written here: store one in the system
/// keyring or export TAPO_PASSWORD instead.
fn init(name: &str, host: String, username: String, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();

    let mut config: Config = match fs::read_to_string(&path) {
        Ok(raw) => toml::from_str(&raw).map_err(|e| CliError::Validation {
            field: "config".into(),
            reason: format!("existing config is not valid TOML: {e}"),
        })?,
        Err(_) => Config::default(),
    };

    config.profiles.insert(
        name.to_owned(),
        Profile {
            host,
            username,
            password: None,
            password_env: None,
            cloud_password: None,
            timeout: None,
        },
    );
    if config.default_profile.is_none() {
        config.default_profile = Some(name.to_owned());
    }

    let rendered = toml::to_string_pretty(&config).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("failed to render config: {e}"),
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, rendered)?;

    if !global.quiet {
        eprintln!("Wrote profile '{name}' to {}", path.display());
    }
    Ok(())
}

/// Print the active configuration with secrets redacted.
fn show() -> Result<(), CliError> {
    let mut config = config::load_config_or_default();

    for profile in config.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("<redacted>".into());
        }
        if profile.cloud_password.is_some() {
            profile.cloud_password = Some("<redacted>".into());
        }
    }

    let rendered = toml::to_string_pretty(&config).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("failed to render config: {e}"),
    })?;
    println!("{rendered}");
    Ok(())
}
