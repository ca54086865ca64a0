// Device endpoints
//
// Label, switch state, and climate display mode. Channel-scoped commands
// address channel 1, the first functional channel after the base channel.

use reqwest::header::HeaderMap;
use serde_json::json;
use tracing::debug;

use crate::client::HmipClient;
use crate::error::Error;

const PRIMARY_CHANNEL: u32 = 1;

impl HmipClient {
    /// Rename a device.
    ///
    /// `POST /hmip/device/setDeviceLabel`
    pub async fn set_device_label(&self, device_id: &str, label: &str) -> Result<(), Error> {
        debug!(device_id, label, "setting device label");
        let body = json!({ "deviceId": device_id, "label": label });
        self.post_command("device/setDeviceLabel", &body, HeaderMap::new())
            .await
    }

    /// Switch a plug on or off.
    ///
    /// `POST /hmip/device/control/setSwitchState`
    pub async fn set_switch_state(&self, device_id: &str, on: bool) -> Result<(), Error> {
        debug!(device_id, on, "setting switch state");
        let body = json!({
            "channelIndex": PRIMARY_CHANNEL,
            "deviceId": device_id,
            "on": on,
        });
        self.post_command("device/control/setSwitchState", &body, HeaderMap::new())
            .await
    }

    /// Choose what a climate display shows (`ACTUAL`, `SETPOINT`,
    /// `ACTUAL_HUMIDITY`).
    ///
    /// `POST /hmip/device/configuration/setClimateControlDisplay`
    pub async fn set_climate_control_display(
        &self,
        device_id: &str,
        display: &str,
    ) -> Result<(), Error> {
        // `display` shadows `tracing::field::display` inside the macro expansion.
        let display_mode = display;
        debug!(device_id, display = display_mode, "setting climate control display");
        let body = json!({
            "channelIndex": PRIMARY_CHANNEL,
            "deviceId": device_id,
            "display": display,
        });
        self.post_command(
            "device/configuration/setClimateControlDisplay",
            &body,
            HeaderMap::new(),
        )
        .await
    }
}
