// ── Core error types ──
//
// User-facing errors from hmip-core. Consumers never see HTTP status codes
// or JSON parse failures directly. The `From<hmip_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Could not find device {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Devices not registered on this access point: {}", ids.join(", "))]
    UnknownDevices { ids: Vec<String> },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("can't {operation} device {device_id} of type {device_type}")]
    Unsupported {
        operation: &'static str,
        device_id: String,
        device_type: String,
    },

    #[error("Operation rejected by the service: {message}")]
    Rejected {
        message: String,
        /// The service `errorCode` (e.g. `INVALID_PIN`).
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hmip_api::Error> for CoreError {
    fn from(err: hmip_api::Error) -> Self {
        match err {
            hmip_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            hmip_api::Error::NotAcknowledged => CoreError::AuthenticationFailed {
                message: "connection request was not acknowledged on the access point".into(),
            },
            hmip_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() || e.is_request() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Rejected {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            hmip_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hmip_api::Error::InvalidHeader { name } => CoreError::Config {
                message: format!("{name} contains characters that cannot be sent in a header"),
            },
            hmip_api::Error::Lookup { message } => CoreError::ConnectionFailed {
                url: "host lookup".into(),
                reason: message,
            },
            hmip_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Rejected {
                message,
                code,
                status: Some(status),
            },
            hmip_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
