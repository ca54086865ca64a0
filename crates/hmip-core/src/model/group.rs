use serde::Serialize;

/// A group of device channels: rooms, heating groups, security zones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub group_type: String,
    /// Member device ids in channel order, without duplicates.
    pub members: Vec<String>,
}

impl Group {
    /// Listing order: group type, then label.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.group_type, &self.label)
    }
}
