//! Read-only listings: devices, groups, firmware, security journal.

use std::fmt::Write as _;

use chrono::Local;
use serde::Serialize;
use tabled::Tabled;
use tracing::error;

use hmip_core::{Device, Group, SecurityJournalEntry, Session};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{self, or_dash};

const JOURNAL_TIME_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

// ── Devices ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Low Bat")]
    low_bat: String,
    #[tabled(rename = "Unreach")]
    unreach: String,
    #[tabled(rename = "RSSI")]
    rssi: String,
    #[tabled(rename = "Duty Cycle")]
    duty_cycle: String,
}

fn device_row(d: &&Device) -> DeviceRow {
    DeviceRow {
        id: d.id.clone(),
        device_type: d.device_type.clone(),
        label: d.label.clone(),
        low_bat: or_dash(d.status.low_bat),
        unreach: or_dash(d.status.unreach),
        rssi: or_dash(d.status.rssi_device_value),
        duty_cycle: or_dash(d.status.duty_cycle),
    }
}

/// `{id} {type} {label} lowbat(..) ...`, followed by whatever readings the
/// device reports.
fn device_line(d: &Device) -> String {
    let s = &d.status;
    let mut line = format!(
        "{} {} {} lowbat({}) unreach({}) rssiDeviceValue({}) rssiPeerValue({}) \
         configPending({}) dutyCycle({})",
        d.id,
        d.device_type,
        d.label,
        or_dash(s.low_bat),
        or_dash(s.unreach),
        or_dash(s.rssi_device_value),
        or_dash(s.rssi_peer_value),
        or_dash(s.config_pending),
        or_dash(s.duty_cycle),
    );

    let r = &d.readings;
    if let Some(on) = r.on {
        let _ = write!(line, " on({on})");
    }
    if let Some(counter) = r.energy_counter {
        let _ = write!(line, " energyCounter({counter})");
    }
    if let Some(power) = r.current_power_consumption {
        let _ = write!(line, " currentPowerConsumption({power}W)");
    }
    if let Some(temp) = r.actual_temperature {
        let _ = write!(line, " actualTemperature({temp})");
    }
    if let Some(humidity) = r.humidity {
        let _ = write!(line, " humidity({humidity})");
    }
    if let Some(ref display) = r.display {
        let _ = write!(line, " display({display})");
    }
    line
}

pub fn devices(session: &Session, format: OutputFormat) -> Result<(), CliError> {
    let devices = session.home().devices_sorted();
    let out = output::render_list(format, &devices, device_row, |d| device_line(d))?;
    output::print_output(&out);
    Ok(())
}

// ── Groups ──────────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Type")]
    group_type: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Members")]
    members: usize,
}

fn group_line(g: &Group) -> String {
    format!("{} {}", g.group_type, g.label)
}

pub fn groups(session: &Session, format: OutputFormat) -> Result<(), CliError> {
    let groups = session.home().groups_sorted();
    let out = output::render_list(
        format,
        &groups,
        |g| GroupRow {
            group_type: g.group_type.clone(),
            label: g.label.clone(),
            members: g.members.len(),
        },
        |g| group_line(g),
    )?;
    output::print_output(&out);
    Ok(())
}

// ── Firmware ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FirmwareInfo<'a> {
    id: &'a str,
    label: &'a str,
    device_type: &'a str,
    firmware_version: Option<&'a str>,
    available_firmware_version: Option<&'a str>,
    update_state: Option<&'a str>,
}

impl<'a> From<&'a Device> for FirmwareInfo<'a> {
    fn from(d: &'a Device) -> Self {
        Self {
            id: &d.id,
            label: &d.label,
            device_type: &d.device_type,
            firmware_version: d.firmware_version.as_deref(),
            available_firmware_version: d.available_firmware_version.as_deref(),
            update_state: d.update_state.as_deref(),
        }
    }
}

#[derive(Tabled)]
struct FirmwareRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Update State")]
    update_state: String,
}

fn firmware_row(f: &FirmwareInfo<'_>) -> FirmwareRow {
    let available = or_dash(f.available_firmware_version);
    let update_pending = f
        .available_firmware_version
        .is_some_and(|avail| Some(avail) != f.firmware_version);
    FirmwareRow {
        label: f.label.to_owned(),
        device_type: f.device_type.to_owned(),
        firmware: or_dash(f.firmware_version),
        available: if update_pending {
            output::highlight(&available)
        } else {
            available
        },
        update_state: or_dash(f.update_state),
    }
}

fn firmware_line(f: &FirmwareInfo<'_>) -> String {
    format!(
        "{:45} - Firmware: {:6} - Available Firmware: {} UpdateState: {}",
        f.label,
        f.firmware_version.unwrap_or("-"),
        f.available_firmware_version.unwrap_or("-"),
        f.update_state.unwrap_or("-"),
    )
}

pub fn firmware(session: &Session, format: OutputFormat) -> Result<(), CliError> {
    let infos: Vec<FirmwareInfo<'_>> = session
        .home()
        .devices_sorted()
        .into_iter()
        .map(FirmwareInfo::from)
        .collect();
    let out = output::render_list(format, &infos, firmware_row, firmware_line)?;
    output::print_output(&out);
    Ok(())
}

// ── Security journal ────────────────────────────────────────────────

#[derive(Tabled)]
struct JournalRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Event")]
    event_type: String,
    #[tabled(rename = "Label")]
    label: String,
}

fn local_time(entry: &SecurityJournalEntry) -> String {
    entry.timestamp.map_or_else(
        || "-".to_owned(),
        |ts| ts.with_timezone(&Local).format(JOURNAL_TIME_FORMAT).to_string(),
    )
}

fn journal_line(entry: &SecurityJournalEntry) -> String {
    format!("{} {} {}", entry.event_type, entry.label, local_time(entry))
}

/// Fetch and print the journal. A failed fetch is logged, not fatal.
pub async fn security_journal(session: &Session, format: OutputFormat) -> Result<(), CliError> {
    let entries = match session.security_journal().await {
        Ok(entries) => entries,
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };
    let out = output::render_list(
        format,
        &entries,
        |e| JournalRow {
            time: local_time(e),
            event_type: e.event_type.clone(),
            label: e.label.clone(),
        },
        journal_line,
    )?;
    output::print_output(&out);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use hmip_core::{DeviceStatus, Readings};

    use super::*;

    fn plug() -> Device {
        Device {
            id: "3014F711A0000000000000AB".into(),
            label: "Coffee".into(),
            device_type: "PLUGABLE_SWITCH_MEASURING".into(),
            model_type: None,
            firmware_version: Some("2.6.2".into()),
            available_firmware_version: Some("2.8.0".into()),
            update_state: Some("UPDATE_AVAILABLE".into()),
            status: DeviceStatus {
                unreach: Some(false),
                low_bat: None,
                rssi_device_value: Some(-60),
                rssi_peer_value: Some(-58),
                config_pending: Some(false),
                duty_cycle: Some(false),
            },
            readings: Readings {
                on: Some(true),
                current_power_consumption: Some(3.5),
                ..Readings::default()
            },
        }
    }

    #[test]
    fn device_line_has_status_then_readings() {
        assert_eq!(
            device_line(&plug()),
            "3014F711A0000000000000AB PLUGABLE_SWITCH_MEASURING Coffee lowbat(-) \
             unreach(false) rssiDeviceValue(-60) rssiPeerValue(-58) configPending(false) \
             dutyCycle(false) on(true) currentPowerConsumption(3.5W)"
        );
    }

    #[test]
    fn firmware_line_pads_label_and_version() {
        let device = plug();
        let line = firmware_line(&FirmwareInfo::from(&device));
        assert_eq!(
            line,
            format!(
                "{:45} - Firmware: 2.6.2  - Available Firmware: 2.8.0 UpdateState: UPDATE_AVAILABLE",
                "Coffee"
            )
        );
    }

    #[test]
    fn group_line_is_type_then_label() {
        let group = Group {
            id: "g".into(),
            label: "Kitchen".into(),
            group_type: "META".into(),
            members: Vec::new(),
        };
        assert_eq!(group_line(&group), "META Kitchen");
    }

    #[test]
    fn journal_line_uses_local_time() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).single();
        let entry = SecurityJournalEntry {
            timestamp,
            event_type: "ACTIVATION_CHANGED".into(),
            label: "Absence".into(),
        };
        let expected_time = timestamp
            .unwrap()
            .with_timezone(&Local)
            .format(JOURNAL_TIME_FORMAT)
            .to_string();
        assert_eq!(
            journal_line(&entry),
            format!("ACTIVATION_CHANGED Absence {expected_time}")
        );
    }

    #[test]
    fn journal_line_without_timestamp_shows_dash() {
        let entry = SecurityJournalEntry {
            timestamp: None,
            event_type: "SENSOR_EVENT".into(),
            label: "Door".into(),
        };
        assert_eq!(journal_line(&entry), "SENSOR_EVENT Door -");
    }
}
