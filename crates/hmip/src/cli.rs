//! Clap derive structures for the `hmip` CLI.
//!
//! Flat action flags for the access point, plus a few auxiliary
//! subcommands. Also compiled by `build.rs` for man page generation, so
//! this file depends on nothing but clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hmip -- control a HomematicIP access point from the command line
#[derive(Debug, Parser)]
#[command(
    name = "hmip",
    version,
    about = "Control a HomematicIP access point from the command line",
    long_about = "List and modify the devices, groups and security settings of a \
        HomematicIP home.\n\n\
        Actions run in a fixed order: list devices, list groups, protection \
        mode, pin, security journal, firmware, device settings, zone assignment."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(flatten)]
    pub actions: ActionArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "HMIP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Access point SGTIN (overrides config)
    #[arg(long, env = "HMIP_ACCESS_POINT", global = true)]
    pub access_point: Option<String>,

    /// Auth token (overrides config and keyring)
    #[arg(long, env = "HMIP_AUTH_TOKEN", global = true, hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "HMIP_OUTPUT", default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// The debug level which should get used (CRITICAL=50, DEBUG=10)
    #[arg(
        long = "debug-level",
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=50)
    )]
    pub debug_level: Option<u8>,
}

// ── Action flags ─────────────────────────────────────────────────────

#[derive(Debug, Default, Args)]
pub struct ActionArgs {
    /// List all devices
    #[arg(long, help_heading = "Display Configuration")]
    pub list_devices: bool,

    /// List all groups
    #[arg(long, help_heading = "Display Configuration")]
    pub list_groups: bool,

    /// List the firmware of all devices
    #[arg(long, help_heading = "Display Configuration")]
    pub list_firmware: bool,

    /// Display the security journal
    #[arg(long)]
    pub list_security_journal: bool,

    /// The device you want to modify (see "Device Settings")
    #[arg(short = 'd', long)]
    pub device: Option<String>,

    /// Turn the switch on
    #[arg(long = "turn_on", help_heading = "Device Settings", conflicts_with = "turn_off")]
    pub turn_on: bool,

    /// Turn the switch off
    #[arg(long = "turn_off", help_heading = "Device Settings")]
    pub turn_off: bool,

    /// Set a new label
    #[arg(long, value_name = "LABEL", help_heading = "Device Settings")]
    pub set_label: Option<String>,

    /// Set the display mode
    #[arg(long, value_name = "MODE", help_heading = "Device Settings")]
    pub set_display: Option<DisplayArg>,

    /// Set the protection mode
    #[arg(long, value_name = "MODE", help_heading = "Home Settings")]
    pub set_protection_mode: Option<ProtectionArg>,

    /// Set a new pin
    #[arg(
        long,
        value_name = "PIN",
        help_heading = "Home Settings",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub set_pin: Option<String>,

    /// Delete the pin
    #[arg(long, help_heading = "Home Settings")]
    pub delete_pin: bool,

    /// The current pin, used together with --set-pin or --delete-pin
    #[arg(long, value_name = "PIN", help_heading = "Home Settings")]
    pub old_pin: Option<String>,

    /// Set the zones device assignment
    #[arg(
        long,
        help_heading = "Home Settings",
        requires = "external_devices",
        requires = "internal_devices"
    )]
    pub set_zones_device_assignment: bool,

    /// The devices for the external zone
    #[arg(
        long = "external_devices",
        value_name = "ID",
        num_args = 1..,
        help_heading = "Home Settings"
    )]
    pub external_devices: Vec<String>,

    /// The devices for the internal zone
    #[arg(
        long = "internal_devices",
        value_name = "ID",
        num_args = 1..,
        help_heading = "Home Settings"
    )]
    pub internal_devices: Vec<String>,
}

impl ActionArgs {
    /// Requested switch state: `Some(true)` for --turn_on, `Some(false)`
    /// for --turn_off.
    pub fn switch_state(&self) -> Option<bool> {
        if self.turn_on {
            Some(true)
        } else if self.turn_off {
            Some(false)
        } else {
            None
        }
    }

    /// Whether a device setting accompanies `--device`.
    pub fn has_device_action(&self) -> bool {
        self.device.is_some()
            && (self.set_label.is_some()
                || self.switch_state().is_some()
                || self.set_display.is_some())
    }

    /// Whether any action would run. Without one the CLI prints help.
    pub fn has_action(&self) -> bool {
        self.list_devices
            || self.list_groups
            || self.list_firmware
            || self.list_security_journal
            || self.set_protection_mode.is_some()
            || self.set_pin.is_some()
            || self.delete_pin
            || self.set_zones_device_assignment
            || self.has_device_action()
    }
}

// ── Value enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per item
    Text,
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayArg {
    Actual,
    Setpoint,
    #[value(name = "actual_humidity")]
    ActualHumidity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtectionArg {
    Presence,
    Absence,
    Disable,
}

// ── Subcommands ──────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or create the configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration (auth token redacted)
    Show,

    /// Register this client with the access point and write the config
    Init,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
