// Shared transport configuration for building reqwest::Client instances.
//
// The REST client and the registration client both need the same timeout,
// user agent, and JSON content headers; only the auth headers differ.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;

/// Wire protocol version sent in the `VERSION` header.
pub const API_VERSION: &str = "12";

/// Default host lookup endpoint.
pub const DEFAULT_LOOKUP_URL: &str = "https://lookup.homematic.com:48335/getHost";

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the JSON/version headers plus any
    /// additional default headers.
    pub fn build_client_with_headers(&self, extra: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("version"),
            HeaderValue::from_static(API_VERSION),
        );
        headers.extend(extra);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("hmip/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}

/// Encode a header value, marking it sensitive so it never shows up in
/// debug output.
pub(crate) fn secret_header(name: &'static str, value: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader { name })?;
    value.set_sensitive(true);
    Ok(value)
}
