// ── Wire → domain conversion ──
//
// Flattens the channel maps of `hmip_api` types into the domain model.
// Channel "0" is the device base channel; channel "1" carries the
// kind-specific readings.

use chrono::{DateTime, Utc};
use tracing::warn;

use hmip_api::models::{
    CurrentState, FunctionalChannel, RawDevice, RawGroup, RawJournalEntry,
};

use crate::model::{Device, DeviceStatus, Group, Home, Readings, SecurityJournalEntry};

const BASE_CHANNEL: &str = "0";
const PRIMARY_CHANNEL: &str = "1";

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        let status = raw
            .functional_channels
            .get(BASE_CHANNEL)
            .map(base_status)
            .unwrap_or_default();
        let readings = raw
            .functional_channels
            .get(PRIMARY_CHANNEL)
            .map(primary_readings)
            .unwrap_or_default();

        Self {
            id: raw.id,
            label: raw.label,
            device_type: raw.device_type,
            model_type: raw.model_type,
            firmware_version: raw.firmware_version,
            available_firmware_version: raw.available_firmware_version,
            update_state: raw.update_state,
            status,
            readings,
        }
    }
}

fn base_status(ch: &FunctionalChannel) -> DeviceStatus {
    DeviceStatus {
        unreach: ch.unreach,
        low_bat: ch.low_bat,
        rssi_device_value: ch.rssi_device_value,
        rssi_peer_value: ch.rssi_peer_value,
        config_pending: ch.config_pending,
        duty_cycle: ch.duty_cycle,
    }
}

fn primary_readings(ch: &FunctionalChannel) -> Readings {
    Readings {
        on: ch.on,
        energy_counter: ch.energy_counter,
        current_power_consumption: ch.current_power_consumption,
        actual_temperature: ch.actual_temperature,
        humidity: ch.humidity,
        display: ch.display.clone(),
    }
}

impl From<RawGroup> for Group {
    fn from(raw: RawGroup) -> Self {
        let mut members: Vec<String> = Vec::with_capacity(raw.channels.len());
        for channel in raw.channels {
            if !members.contains(&channel.device_id) {
                members.push(channel.device_id);
            }
        }
        Self {
            id: raw.id,
            label: raw.label,
            group_type: raw.group_type,
            members,
        }
    }
}

impl From<RawJournalEntry> for SecurityJournalEntry {
    fn from(raw: RawJournalEntry) -> Self {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(raw.event_timestamp);
        if timestamp.is_none() {
            warn!(millis = raw.event_timestamp, "journal timestamp out of range");
        }
        Self {
            timestamp,
            event_type: raw.event_type,
            label: raw.label,
        }
    }
}

impl From<CurrentState> for Home {
    fn from(state: CurrentState) -> Self {
        Self {
            id: state.home.id,
            current_ap_version: state.home.current_ap_version,
            available_ap_version: state.home.available_ap_version,
            pin_assigned: state.home.pin_assigned,
            devices: state.devices.into_values().map(Device::from).collect(),
            groups: state.groups.into_values().map(Group::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use hmip_api::models::GroupChannel;

    use super::*;

    #[test]
    fn group_members_are_deduplicated_in_order() {
        let raw = RawGroup {
            id: "g".into(),
            label: "Zone".into(),
            group_type: "SECURITY_ZONE".into(),
            channels: ["b", "a", "b"]
                .into_iter()
                .map(|id| GroupChannel {
                    device_id: id.into(),
                    channel_index: Some(1),
                })
                .collect(),
        };
        assert_eq!(Group::from(raw).members, ["b", "a"]);
    }

    #[test]
    fn device_without_channels_has_empty_status() {
        let raw = RawDevice {
            id: "d".into(),
            label: "Bare".into(),
            device_type: "PUSH_BUTTON".into(),
            firmware_version: None,
            available_firmware_version: None,
            update_state: None,
            model_type: None,
            oem: None,
            last_status_update: None,
            functional_channels: BTreeMap::new(),
        };
        let device = Device::from(raw);
        assert_eq!(device.status, DeviceStatus::default());
        assert_eq!(device.readings, Readings::default());
    }

    #[test]
    fn journal_timestamp_is_milliseconds() {
        let entry = SecurityJournalEntry::from(RawJournalEntry {
            event_timestamp: 1_500_000_000_123,
            event_type: "SENSOR_EVENT".into(),
            label: "Door".into(),
        });
        let ts = entry.timestamp.unwrap();
        assert_eq!(ts.timestamp(), 1_500_000_000);
        assert_eq!(ts.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn journal_timestamp_out_of_range_is_none() {
        let entry = SecurityJournalEntry::from(RawJournalEntry {
            event_timestamp: i64::MAX,
            event_type: "SENSOR_EVENT".into(),
            label: "Door".into(),
        });
        assert_eq!(entry.timestamp, None);
        assert_eq!(entry.label, "Door");
    }
}
