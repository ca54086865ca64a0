// Home-level endpoints
//
// State snapshot, security journal, protection (zone activation), pin, and
// security zone membership.

use reqwest::header::HeaderMap;
use serde_json::json;
use tracing::debug;

use crate::client::{HmipClient, pin_header};
use crate::error::Error;
use crate::models::{
    CurrentState, RawJournalEntry, SecurityJournal, ZonesActivation, ZonesDeviceAssignment,
};

impl HmipClient {
    /// Fetch the full home snapshot: home, devices, groups.
    ///
    /// `POST /hmip/home/getCurrentState`
    pub async fn get_current_state(&self) -> Result<CurrentState, Error> {
        debug!("fetching current state");
        self.post("home/getCurrentState", self.characteristics()).await
    }

    /// Fetch the security journal.
    ///
    /// `POST /hmip/home/getSecurityJournal`
    pub async fn get_security_journal(&self) -> Result<Vec<RawJournalEntry>, Error> {
        debug!("fetching security journal");
        let journal: SecurityJournal = self
            .post("home/getSecurityJournal", self.characteristics())
            .await?;
        Ok(journal.entries)
    }

    /// Arm or disarm the internal and external security zones.
    ///
    /// `POST /hmip/home/security/setZonesActivation`
    pub async fn set_security_zones_activation(
        &self,
        internal: bool,
        external: bool,
    ) -> Result<(), Error> {
        debug!(internal, external, "setting zones activation");
        let body = json!({
            "zonesActivation": ZonesActivation { external, internal },
        });
        self.post_command("home/security/setZonesActivation", &body, HeaderMap::new())
            .await
    }

    /// Set a new pin. `None` (or an empty pin) removes the pin. The current
    /// pin, if one is assigned, must be passed as `old_pin`.
    ///
    /// `POST /hmip/home/setPin` with the old pin in the `PIN` header
    pub async fn set_pin(&self, new_pin: Option<&str>, old_pin: Option<&str>) -> Result<(), Error> {
        debug!(delete = new_pin.is_none(), "setting pin");
        let body = json!({ "pin": new_pin.unwrap_or_default() });
        self.post_command("home/setPin", &body, pin_header(old_pin)?)
            .await
    }

    /// Replace the device membership of both security zones.
    ///
    /// `POST /hmip/home/security/setZonesDeviceAssignment`
    pub async fn set_zones_device_assignment(
        &self,
        internal: &[String],
        external: &[String],
    ) -> Result<(), Error> {
        debug!(
            internal = internal.len(),
            external = external.len(),
            "setting zones device assignment"
        );
        let body = json!({
            "zonesDeviceAssignment": ZonesDeviceAssignment { internal, external },
        });
        self.post_command(
            "home/security/setZonesDeviceAssignment",
            &body,
            HeaderMap::new(),
        )
        .await
    }
}
