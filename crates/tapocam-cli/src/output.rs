//! Rendering for `info` and `preset list`.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use tapocam_api::{CameraInfo, Preset};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Print the normalized camera state.
pub fn print_info(info: &CameraInfo, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(info)?);
        }
        OutputFormat::Table => {
            let alias = info.basic.get("device_alias").and_then(|v| v.as_str());
            let model = info.basic.get("device_model").and_then(|v| v.as_str());
            if let (Some(alias), Some(model)) = (alias, model) {
                println!("{} ({model})", alias.bold());
            }

            print_flag("Privacy mode", info.lens_mask);
            print_flag("LED", info.led);
            print_flag("Motion detection", info.motion_detection.enabled);
            print_flag("Auto-track", info.auto_track);
            println!(
                "{:<18} {} (digital {})",
                "Sensitivity:",
                info.motion_detection.sensitivity,
                info.motion_detection.digital_sensitivity
            );
            println!("{:<18} {}", "Device time:", info.clock.local_time);

            if !info.presets.is_empty() {
                println!();
                print_presets(&info.presets, format)?;
            }
        }
    }
    Ok(())
}

/// Print the preset table.
pub fn print_presets(presets: &[Preset], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(presets)?);
        }
        OutputFormat::Table => {
            let rows: Vec<PresetRow> = presets.iter().map(PresetRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
        }
    }
    Ok(())
}

fn print_flag(label: &str, on: bool) {
    let state = if on {
        "on".green().to_string()
    } else {
        "off".red().to_string()
    };
    println!("{:<18} {state}", format!("{label}:"));
}

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Pan")]
    pan: f64,
    #[tabled(rename = "Tilt")]
    tilt: f64,
    #[tabled(rename = "Read-only")]
    read_only: bool,
}

impl From<&Preset> for PresetRow {
    fn from(preset: &Preset) -> Self {
        Self {
            id: preset.id,
            name: preset.name.clone(),
            pan: preset.pan,
            tilt: preset.tilt,
            read_only: preset.read_only,
        }
    }
}
