//! Command-line definitions for the `tapocam` binary.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "tapocam",
    version,
    about = "Control TP-Link Tapo cameras over the local network",
    long_about = "Control TP-Link Tapo cameras over the local network: device state, \
                  privacy mode, LED, motion detection, PTZ motor, and presets."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Camera host (IP or hostname), or a full https:// base URL
    #[arg(long, global = true, env = "TAPO_HOST")]
    pub host: Option<String>,

    /// Camera account username
    #[arg(long, short = 'u', global = true, env = "TAPO_USERNAME")]
    pub username: Option<String>,

    /// Camera account password (prefer TAPO_PASSWORD or the keyring)
    #[arg(long, global = true, env = "TAPO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Named profile from the config file
    #[arg(long, short = 'p', global = true, env = "TAPO_PROFILE")]
    pub profile: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "TAPO_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table, env = "TAPO_OUTPUT")]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Assume "yes" for destructive-operation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the camera's current state
    Info,

    /// Apply one or more camera settings
    Set(SetArgs),

    /// PTZ motor control
    Motor(MotorArgs),

    /// Manage PTZ presets
    Preset(PresetArgs),

    /// Device maintenance operations
    System(SystemArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// An on/off toggle value for `set` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayNight {
    Auto,
    On,
    Off,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Status LED
    #[arg(long, value_enum)]
    pub led: Option<Toggle>,

    /// Privacy mode (lens mask)
    #[arg(long, value_enum)]
    pub privacy: Option<Toggle>,

    /// Motion detection
    #[arg(long, value_enum)]
    pub motion: Option<Toggle>,

    /// Automatic target tracking
    #[arg(long, value_enum)]
    pub auto_track: Option<Toggle>,

    /// Day/night (infrared) mode
    #[arg(long, value_enum)]
    pub day_night: Option<DayNight>,

    /// Vertical image flip
    #[arg(long, value_enum)]
    pub flip: Option<Toggle>,

    /// Lens distortion correction
    #[arg(long, value_enum)]
    pub ldc: Option<Toggle>,
}

#[derive(Debug, Args)]
pub struct MotorArgs {
    #[command(subcommand)]
    pub command: MotorCommand,
}

#[derive(Debug, Subcommand)]
pub enum MotorCommand {
    /// Move the motor by relative coordinates
    Move {
        #[arg(long, short = 'x', allow_hyphen_values = true)]
        x: i64,
        #[arg(long, allow_hyphen_values = true)]
        y: i64,
    },
    /// Step the motor in a direction (degrees)
    Step {
        #[arg(long, allow_hyphen_values = true)]
        direction: i64,
    },
    /// Run the motor calibration routine
    Calibrate,
}

#[derive(Debug, Args)]
pub struct PresetArgs {
    #[command(subcommand)]
    pub command: PresetCommand,
}

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    /// List saved presets
    List,
    /// Save the current position as a preset
    Save { name: String },
    /// Move to a saved preset
    Goto { id: i64 },
    /// Delete a preset
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct SystemArgs {
    #[command(subcommand)]
    pub command: SystemCommand,
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Format the SD card (destructive)
    Format,
    /// Reboot the camera
    Reboot,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile in the config file
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,
        /// Camera host
        #[arg(long)]
        host: String,
        /// Camera account username
        #[arg(long)]
        username: String,
    },
    /// Print the active configuration (secrets redacted)
    Show,
    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
