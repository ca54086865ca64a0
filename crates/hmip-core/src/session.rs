// ── Session ──
//
// One authenticated conversation with the service: bootstrap, the home
// snapshot, and the typed commands the CLI dispatches. Capability and id
// checks happen here, before anything is sent, so a rejected command never
// reaches the network.

use tracing::{debug, info};

use hmip_api::HmipClient;

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::model::{
    Capability, Device, DisplayMode, Home, ProtectionMode, SecurityJournalEntry,
};

/// An open session with a loaded home snapshot.
pub struct Session {
    client: HmipClient,
    home: Home,
}

impl Session {
    /// Resolve the REST host, then load the current state.
    ///
    /// Any failure here is fatal for the run: there is no home to act on.
    pub async fn connect(config: &SessionConfig) -> Result<Self, CoreError> {
        let client = HmipClient::connect(&config.connection()).await?;
        Self::from_client(client).await
    }

    /// Load the current state through an already constructed client.
    pub async fn from_client(client: HmipClient) -> Result<Self, CoreError> {
        let state = client.get_current_state().await?;
        let home = Home::from(state);
        info!(
            home = %home.id,
            devices = home.devices.len(),
            groups = home.groups.len(),
            "loaded current state"
        );
        Ok(Self { client, home })
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    /// Look up a device in the snapshot.
    pub fn device(&self, id: &str) -> Result<&Device, CoreError> {
        self.home
            .search_device_by_id(id)
            .ok_or_else(|| CoreError::DeviceNotFound {
                identifier: id.to_owned(),
            })
    }

    // ── Home commands ────────────────────────────────────────────────

    pub async fn set_protection_mode(&self, mode: ProtectionMode) -> Result<(), CoreError> {
        let (internal, external) = mode.zones_activation();
        debug!(%mode, "setting protection mode");
        self.client
            .set_security_zones_activation(internal, external)
            .await?;
        Ok(())
    }

    pub async fn set_pin(&self, new_pin: &str, old_pin: Option<&str>) -> Result<(), CoreError> {
        self.client.set_pin(Some(new_pin), old_pin).await?;
        Ok(())
    }

    /// Remove the pin; same request as setting an empty pin.
    pub async fn delete_pin(&self, old_pin: Option<&str>) -> Result<(), CoreError> {
        self.client.set_pin(None, old_pin).await?;
        Ok(())
    }

    pub async fn security_journal(&self) -> Result<Vec<SecurityJournalEntry>, CoreError> {
        let entries = self.client.get_security_journal().await?;
        Ok(entries.into_iter().map(SecurityJournalEntry::from).collect())
    }

    /// Replace both security zones' members.
    ///
    /// Every id must be known; otherwise nothing is sent and all unknown ids
    /// are returned in [`CoreError::UnknownDevices`].
    pub async fn set_zones_device_assignment(
        &self,
        internal: &[String],
        external: &[String],
    ) -> Result<(), CoreError> {
        let unknown = self.home.unknown_device_ids(&[external, internal].concat());
        if !unknown.is_empty() {
            return Err(CoreError::UnknownDevices { ids: unknown });
        }

        self.client
            .set_zones_device_assignment(internal, external)
            .await?;
        Ok(())
    }

    // ── Device commands ──────────────────────────────────────────────

    pub async fn set_device_label(&self, device: &Device, label: &str) -> Result<(), CoreError> {
        self.client.set_device_label(&device.id, label).await?;
        Ok(())
    }

    pub async fn set_switch_state(&self, device: &Device, on: bool) -> Result<(), CoreError> {
        require(device, Capability::Switch, "turn on/off")?;
        self.client.set_switch_state(&device.id, on).await?;
        Ok(())
    }

    pub async fn set_display(&self, device: &Device, mode: DisplayMode) -> Result<(), CoreError> {
        require(device, Capability::Display, "set display of")?;
        self.client
            .set_climate_control_display(&device.id, mode.as_ref())
            .await?;
        Ok(())
    }
}

fn require(
    device: &Device,
    capability: Capability,
    operation: &'static str,
) -> Result<(), CoreError> {
    if device.supports(capability) {
        Ok(())
    } else {
        Err(CoreError::Unsupported {
            operation,
            device_id: device.id.clone(),
            device_type: device.device_type.clone(),
        })
    }
}
