// ── Domain model ──
//
// Canonical types handed to consumers. Built from the wire types in
// `hmip_api::models` by `crate::convert`; nothing here knows about JSON
// field names.

pub mod device;
pub mod group;
pub mod home;
pub mod journal;
pub mod settings;

pub use device::{Capability, Device, DeviceKind, DeviceStatus, Readings};
pub use group::Group;
pub use home::Home;
pub use journal::SecurityJournalEntry;
pub use settings::{DisplayMode, ProtectionMode};
