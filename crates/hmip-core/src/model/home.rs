use serde::Serialize;

use super::device::Device;
use super::group::Group;

/// Snapshot of one home: the access point plus every device and group.
///
/// Built once per session from `getCurrentState` and never refreshed; all
/// mutations go straight to the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Home {
    pub id: String,
    pub current_ap_version: Option<String>,
    pub available_ap_version: Option<String>,
    pub pin_assigned: Option<bool>,
    pub devices: Vec<Device>,
    pub groups: Vec<Group>,
}

impl Home {
    /// Linear search by device id.
    pub fn search_device_by_id(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Devices ordered by (type, label).
    pub fn devices_sorted(&self) -> Vec<&Device> {
        let mut devices: Vec<&Device> = self.devices.iter().collect();
        devices.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        devices
    }

    /// Groups ordered by (type, label).
    pub fn groups_sorted(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.iter().collect();
        groups.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        groups
    }

    /// The ids in `ids` that match no device, in input order.
    pub fn unknown_device_ids(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .filter(|id| self.search_device_by_id(id).is_none())
            .cloned()
            .collect()
    }
}
