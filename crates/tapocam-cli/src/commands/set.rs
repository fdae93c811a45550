//! `set` command handler: collect toggles into one merged request.

use tapocam_api::{DayNightMode, SetControl, TapoClient};

use crate::cli::{DayNight, GlobalOpts, SetArgs};
use crate::error::CliError;

pub async fn handle(
    client: &TapoClient,
    args: SetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut controls = Vec::new();

    if let Some(toggle) = args.led {
        controls.push(SetControl::Led(toggle.is_on()));
    }
    if let Some(toggle) = args.privacy {
        controls.push(SetControl::PrivacyMode(toggle.is_on()));
    }
    if let Some(toggle) = args.motion {
        controls.push(SetControl::MotionDetection(toggle.is_on()));
    }
    if let Some(toggle) = args.auto_track {
        controls.push(SetControl::AutoTrackTarget(toggle.is_on()));
    }
    if let Some(mode) = args.day_night {
        let mode = match mode {
            DayNight::Auto => DayNightMode::Auto,
            DayNight::On => DayNightMode::On,
            DayNight::Off => DayNightMode::Off,
        };
        controls.push(SetControl::DayNightMode(mode));
    }
    if let Some(toggle) = args.flip {
        controls.push(SetControl::ImageFlipVertical(toggle.is_on()));
    }
    if let Some(toggle) = args.ldc {
        controls.push(SetControl::LensDistortionCorrection(toggle.is_on()));
    }

    if controls.is_empty() {
        return Err(CliError::Validation {
            field: "set".into(),
            reason: "no settings given; see 'tapocam set --help'".into(),
        });
    }

    let count = controls.len();
    client.set(&controls).await?;

    if !global.quiet {
        eprintln!("Applied {count} setting(s)");
    }
    Ok(())
}
