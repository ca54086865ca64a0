//! Home-level settings: protection mode, pin, zone assignment.
//!
//! Every failure here is logged and the action skipped; the run goes on.

use tracing::{error, info};

use hmip_core::{CoreError, ProtectionMode, Session};

pub async fn protection_mode(session: &Session, mode: ProtectionMode) {
    match session.set_protection_mode(mode).await {
        Ok(()) => info!(%mode, "protection mode set"),
        Err(err) => error!("{err}"),
    }
}

/// Set and/or delete the pin, in that order, so a delete wins.
pub async fn pin(session: &Session, new_pin: Option<&str>, delete: bool, old_pin: Option<&str>) {
    if let Some(new_pin) = new_pin {
        match session.set_pin(new_pin, old_pin).await {
            Ok(()) => info!("pin set"),
            Err(err) => error!("{err}"),
        }
    }
    if delete {
        match session.delete_pin(old_pin).await {
            Ok(()) => info!("pin deleted"),
            Err(err) => error!("{err}"),
        }
    }
}

/// Replace both security zones' members; all ids must be known.
pub async fn zones_device_assignment(session: &Session, internal: &[String], external: &[String]) {
    match session.set_zones_device_assignment(internal, external).await {
        Ok(()) => info!(
            internal = internal.len(),
            external = external.len(),
            "zones device assignment set"
        ),
        Err(CoreError::UnknownDevices { ids }) => {
            for id in ids {
                error!("Device {id} is not registered on this Access Point");
            }
        }
        Err(err) => error!("{err}"),
    }
}
