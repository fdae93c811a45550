//! `system` command handlers: destructive maintenance operations.

use tapocam_api::{DoControl, TapoClient};

use crate::cli::{GlobalOpts, SystemArgs, SystemCommand};
use crate::error::CliError;

pub async fn handle(
    client: &TapoClient,
    args: SystemArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SystemCommand::Format => {
            if !super::confirm("Format the SD card? All recordings will be lost.", global.yes)? {
                return Ok(());
            }
            client.perform(&[DoControl::Format]).await?;
            if !global.quiet {
                eprintln!("Format started");
            }
        }

        SystemCommand::Reboot => {
            if !super::confirm("Reboot the camera?", global.yes)? {
                return Ok(());
            }
            client.perform(&[DoControl::Reboot]).await?;
            if !global.quiet {
                eprintln!("Reboot initiated");
            }
        }
    }
    Ok(())
}
