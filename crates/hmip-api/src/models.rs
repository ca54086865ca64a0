// Wire types for the HomematicIP REST API.
//
// Field names follow the service's camelCase JSON. Everything not needed by
// the domain layer is either optional or collected into `extra`, because the
// service adds fields per device generation without notice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of the host lookup service.
#[derive(Debug, Clone, Deserialize)]
pub struct HostLookup {
    #[serde(rename = "urlREST")]
    pub url_rest: String,
    #[serde(rename = "urlWebSocket", default)]
    pub url_websocket: Option<String>,
}

/// Full snapshot returned by `home/getCurrentState`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentState {
    pub home: RawHome,
    #[serde(default)]
    pub devices: BTreeMap<String, RawDevice>,
    #[serde(default)]
    pub groups: BTreeMap<String, RawGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHome {
    pub id: String,
    #[serde(rename = "currentAPVersion", default)]
    pub current_ap_version: Option<String>,
    #[serde(rename = "availableAPVersion", default)]
    pub available_ap_version: Option<String>,
    pub update_state: Option<String>,
    pub connected: Option<bool>,
    pub pin_assigned: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub firmware_version: Option<String>,
    pub available_firmware_version: Option<String>,
    pub update_state: Option<String>,
    pub model_type: Option<String>,
    pub oem: Option<String>,
    pub last_status_update: Option<i64>,
    #[serde(default)]
    pub functional_channels: BTreeMap<String, FunctionalChannel>,
}

/// One functional channel of a device. Channel `"0"` is the device base
/// channel carrying reachability and radio status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalChannel {
    pub functional_channel_type: Option<String>,
    pub index: Option<u32>,
    pub unreach: Option<bool>,
    pub low_bat: Option<bool>,
    pub rssi_device_value: Option<i32>,
    pub rssi_peer_value: Option<i32>,
    pub config_pending: Option<bool>,
    pub duty_cycle: Option<bool>,
    pub on: Option<bool>,
    pub energy_counter: Option<f64>,
    pub current_power_consumption: Option<f64>,
    pub actual_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub display: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub channels: Vec<GroupChannel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChannel {
    pub device_id: String,
    pub channel_index: Option<u32>,
}

/// Response of `home/getSecurityJournal`.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityJournal {
    #[serde(default)]
    pub entries: Vec<RawJournalEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJournalEntry {
    /// Milliseconds since the Unix epoch.
    pub event_timestamp: i64,
    pub event_type: String,
    #[serde(default)]
    pub label: String,
}

// ── Request bodies ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct ZonesActivation {
    pub external: bool,
    pub internal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct ZonesDeviceAssignment<'a> {
    pub internal: &'a [String],
    pub external: &'a [String],
}

// ── Registration ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthTokenResponse {
    pub auth_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedClient {
    pub client_id: String,
}
