use thiserror::Error;

/// Top-level error type for the `hmip-api` crate.
///
/// Covers every failure mode of the REST surface: host lookup, transport,
/// authentication, and service-side rejections. `hmip-core` maps these into
/// domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The service rejected the auth token or client auth header.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A registration step was not acknowledged by the access point yet.
    #[error("Connection request not acknowledged -- press the blue button on the access point")]
    NotAcknowledged,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value could not be encoded (non-ASCII token, etc.)
    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    /// The lookup service did not return a usable REST endpoint.
    #[error("Host lookup failed: {message}")]
    Lookup { message: String },

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success response from a REST endpoint.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        message: String,
        /// The `errorCode` field from the response body, if any.
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
