// hmip-api: Async Rust client for the HomematicIP cloud REST API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod home;
pub mod models;
pub mod registration;
pub mod transport;

pub use auth::{ClientCharacteristics, client_auth_token, sanitize_access_point_id};
pub use client::{ConnectionConfig, HmipClient};
pub use error::Error;
pub use registration::Registration;
pub use transport::{DEFAULT_LOOKUP_URL, TransportConfig};
