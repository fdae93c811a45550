//! `preset` command handlers.

use tapocam_api::{DoControl, TapoClient};

use crate::cli::{GlobalOpts, PresetArgs, PresetCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &TapoClient,
    args: PresetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PresetCommand::List => {
            let info = client.get_info().await?;
            output::print_presets(&info.presets, global.output)?;
        }

        PresetCommand::Save { name } => {
            client
                .perform(&[DoControl::SavePreset { name: name.clone() }])
                .await?;
            if !global.quiet {
                eprintln!("Saved preset '{name}'");
            }
        }

        PresetCommand::Goto { id } => {
            client.perform(&[DoControl::GotoPreset { id }]).await?;
            if !global.quiet {
                eprintln!("Moving to preset {id}");
            }
        }

        PresetCommand::Delete { id } => {
            if !super::confirm(&format!("Delete preset {id}?"), global.yes)? {
                return Ok(());
            }
            client.perform(&[DoControl::DeletePreset { id }]).await?;
            if !global.quiet {
                eprintln!("Deleted preset {id}");
            }
        }
    }
    Ok(())
}
