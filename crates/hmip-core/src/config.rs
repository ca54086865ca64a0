// ── Runtime connection configuration ──
//
// Describes *how* to reach an access point. Carries credential data and
// connection tuning, but never touches disk. The CLI builds a
// `SessionConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use hmip_api::{ConnectionConfig, TransportConfig};

/// Configuration for one session against one access point.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Access point SGTIN, with or without separators.
    pub access_point: String,
    pub auth_token: SecretString,
    /// Host lookup endpoint.
    pub lookup_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SessionConfig {
    pub(crate) fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            access_point_id: self.access_point.clone(),
            auth_token: self.auth_token.clone(),
            lookup_url: self.lookup_url.clone(),
            transport: TransportConfig {
                timeout: self.timeout,
            },
        }
    }
}
