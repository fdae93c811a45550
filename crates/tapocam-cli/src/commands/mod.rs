//! Command dispatch and shared helpers.

use std::io::{self, Write};

use tapocam_api::TapoClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub mod config_cmd;
pub mod info;
pub mod motor;
pub mod preset;
pub mod set;
pub mod system;

/// Dispatch a camera-facing command.
pub async fn dispatch(
    command: Command,
    client: &TapoClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Info => info::handle(client, global).await,
        Command::Set(args) => set::handle(client, args, global).await,
        Command::Motor(args) => motor::handle(client, args, global).await,
        Command::Preset(args) => preset::handle(client, args, global).await,
        Command::System(args) => system::handle(client, args, global).await,
        // Handled in main before a client is built.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Ask for confirmation before a destructive operation.
///
/// `--yes` skips the prompt. Anything other than an explicit yes answer
/// declines.
pub(crate) fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }

    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "YES"))
}
