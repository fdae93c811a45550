//! `motor` command handlers.

use tapocam_api::{DoControl, TapoClient};

use crate::cli::{GlobalOpts, MotorArgs, MotorCommand};
use crate::error::CliError;

pub async fn handle(
    client: &TapoClient,
    args: MotorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MotorCommand::Move { x, y } => {
            client.perform(&[DoControl::MoveMotor { x, y }]).await?;
            if !global.quiet {
                eprintln!("Motor moved by ({x}, {y})");
            }
        }

        MotorCommand::Step { direction } => {
            client
                .perform(&[DoControl::MoveMotorStep { direction }])
                .await?;
            if !global.quiet {
                eprintln!("Motor stepped toward {direction}\u{b0}");
            }
        }

        MotorCommand::Calibrate => {
            client.perform(&[DoControl::CalibrateMotor]).await?;
            if !global.quiet {
                eprintln!("Calibration started");
            }
        }
    }
    Ok(())
}
