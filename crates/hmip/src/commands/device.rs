//! Per-device settings: label, switch state, display mode.

use tracing::{error, info};

use hmip_core::{Device, DisplayMode, Session};

/// Settings requested for the `--device` target.
#[derive(Debug, Default)]
pub struct DeviceChanges<'a> {
    pub label: Option<&'a str>,
    pub switch_state: Option<bool>,
    pub display: Option<DisplayMode>,
}

/// Apply `changes` to device `id`. An unknown id skips every change; a
/// change the device cannot take is logged and the others still run.
pub async fn apply(session: &Session, id: &str, changes: &DeviceChanges<'_>) {
    let device = match session.device(id) {
        Ok(device) => device,
        Err(err) => {
            error!("{err}");
            return;
        }
    };

    if let Some(label) = changes.label {
        set_label(session, device, label).await;
    }
    if let Some(on) = changes.switch_state {
        match session.set_switch_state(device, on).await {
            Ok(()) => info!(device = %device.id, on, "switch state set"),
            Err(err) => error!("{err}"),
        }
    }
    if let Some(mode) = changes.display {
        match session.set_display(device, mode).await {
            Ok(()) => info!(device = %device.id, %mode, "display mode set"),
            Err(err) => error!("{err}"),
        }
    }
}

async fn set_label(session: &Session, device: &Device, label: &str) {
    match session.set_device_label(device, label).await {
        Ok(()) => info!(device = %device.id, label, "label set"),
        Err(err) => error!("{err}"),
    }
}
