// hmip-core: Domain layer between hmip-api and the CLI.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SessionConfig;
pub use error::CoreError;
pub use session::Session;

pub use model::{
    Capability, Device, DeviceKind, DeviceStatus, DisplayMode, Group, Home, ProtectionMode,
    Readings, SecurityJournalEntry,
};
