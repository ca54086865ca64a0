// ── Device domain types ──

use serde::Serialize;
use strum::EnumString;

/// Device families the CLI can act on, derived from the type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceKind {
    PlugableSwitch,
    PlugableSwitchMeasuring,
    TemperatureHumiditySensorDisplay,
    #[strum(disabled)]
    Other,
}

impl DeviceKind {
    pub fn from_type_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(Self::Other)
    }

    pub fn supports(self, capability: Capability) -> bool {
        match capability {
            Capability::Switch => {
                matches!(self, Self::PlugableSwitch | Self::PlugableSwitchMeasuring)
            }
            Capability::Display => matches!(self, Self::TemperatureHumiditySensorDisplay),
        }
    }
}

/// Remote operations that only some device kinds accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// On/off switching.
    Switch,
    /// Selecting what the built-in display shows.
    Display,
}

/// Radio and health status from the device base channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceStatus {
    pub unreach: Option<bool>,
    pub low_bat: Option<bool>,
    pub rssi_device_value: Option<i32>,
    pub rssi_peer_value: Option<i32>,
    pub config_pending: Option<bool>,
    pub duty_cycle: Option<bool>,
}

/// Kind-specific values from the first functional channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Readings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_counter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_power_consumption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A device as reported by the access point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: String,
    pub label: String,
    pub device_type: String,
    pub model_type: Option<String>,
    pub firmware_version: Option<String>,
    pub available_firmware_version: Option<String>,
    pub update_state: Option<String>,
    pub status: DeviceStatus,
    pub readings: Readings,
}

impl Device {
    pub fn kind(&self) -> DeviceKind {
        DeviceKind::from_type_tag(&self.device_type)
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.kind().supports(capability)
    }

    /// Listing order: type tag, then label.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.device_type, &self.label)
    }
}
