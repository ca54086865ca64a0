//! Command dispatch.
//!
//! Actions run in a fixed order, each gated by its own flag. Only output
//! rendering can fail the run here; remote failures are logged per action.

pub mod config_cmd;
pub mod device;
pub mod home;
pub mod listing;

use hmip_core::{DisplayMode, ProtectionMode, Session};

use crate::cli::{ActionArgs, DisplayArg, OutputFormat, ProtectionArg};
use crate::error::CliError;

use self::device::DeviceChanges;

impl From<DisplayArg> for DisplayMode {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Actual => Self::Actual,
            DisplayArg::Setpoint => Self::Setpoint,
            DisplayArg::ActualHumidity => Self::ActualHumidity,
        }
    }
}

impl From<ProtectionArg> for ProtectionMode {
    fn from(arg: ProtectionArg) -> Self {
        match arg {
            ProtectionArg::Presence => Self::Presence,
            ProtectionArg::Absence => Self::Absence,
            ProtectionArg::Disable => Self::Disable,
        }
    }
}

/// Run every requested action against an open session.
pub async fn dispatch(
    session: &Session,
    actions: &ActionArgs,
    format: OutputFormat,
) -> Result<(), CliError> {
    if actions.list_devices {
        listing::devices(session, format)?;
    }

    if actions.list_groups {
        listing::groups(session, format)?;
    }

    if let Some(mode) = actions.set_protection_mode {
        home::protection_mode(session, mode.into()).await;
    }

    if actions.set_pin.is_some() || actions.delete_pin {
        home::pin(
            session,
            actions.set_pin.as_deref(),
            actions.delete_pin,
            actions.old_pin.as_deref(),
        )
        .await;
    }

    if actions.list_security_journal {
        listing::security_journal(session, format).await?;
    }

    if actions.list_firmware {
        listing::firmware(session, format)?;
    }

    if let Some(ref id) = actions.device {
        let changes = DeviceChanges {
            label: actions.set_label.as_deref(),
            switch_state: actions.switch_state(),
            display: actions.set_display.map(DisplayMode::from),
        };
        device::apply(session, id, &changes).await;
    }

    if actions.set_zones_device_assignment {
        home::zones_device_assignment(
            session,
            &actions.internal_devices,
            &actions.external_devices,
        )
        .await;
    }

    Ok(())
}
