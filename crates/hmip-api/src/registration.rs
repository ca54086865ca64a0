// Auth token registration
//
// A new client obtains an auth token in four steps: announce itself with a
// connection request, wait until the user presses the blue button on the
// access point, request the token, then confirm it. Only the client-auth
// header is needed; there is no auth token yet.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::auth::{ClientCharacteristics, client_auth_token, sanitize_access_point_id};
use crate::client::{lookup_host, parse_body, pin_header, read_response};
use crate::error::Error;
use crate::models::{AuthTokenResponse, ConfirmedClient};
use crate::transport::{TransportConfig, secret_header};

/// One registration attempt for a single access point.
pub struct Registration {
    http: reqwest::Client,
    rest_url: Url,
    access_point_id: String,
    device_id: Uuid,
}

impl Registration {
    /// Resolve the REST host and prepare a registration with a fresh
    /// client device id.
    pub async fn start(
        access_point_id: &str,
        lookup_url: &Url,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(registration_headers(access_point_id)?)?;
        let characteristics = ClientCharacteristics::new(access_point_id);
        let host = lookup_host(&http, lookup_url, &characteristics).await?;

        Ok(Self {
            http,
            rest_url: Url::parse(&host.url_rest)?,
            access_point_id: sanitize_access_point_id(access_point_id),
            device_id: Uuid::new_v4(),
        })
    }

    /// Prepare a registration against a known REST host.
    pub fn with_client(
        http: reqwest::Client,
        rest_url: Url,
        access_point_id: &str,
        device_id: Uuid,
    ) -> Self {
        Self {
            http,
            rest_url,
            access_point_id: sanitize_access_point_id(access_point_id),
            device_id,
        }
    }

    /// The client device id this registration announces.
    pub fn device_id(&self) -> Uuid {
        self.device_id
    }

    /// Announce this client to the access point.
    ///
    /// `pin` is required when the home already has a pin assigned.
    pub async fn connection_request(
        &self,
        device_name: &str,
        pin: Option<&str>,
    ) -> Result<(), Error> {
        let body = json!({
            "deviceId": self.device_id,
            "deviceName": device_name,
            "sgtin": self.access_point_id,
        });
        self.send("auth/connectionRequest", &body, pin_header(pin)?)
            .await
            .map(|_| ())
    }

    /// Whether the user has pressed the button on the access point.
    pub async fn is_request_acknowledged(&self) -> Result<bool, Error> {
        let body = json!({
            "deviceId": self.device_id,
            "accessPointId": self.access_point_id,
        });
        match self
            .send("auth/isRequestAcknowledged", &body, HeaderMap::new())
            .await
        {
            Ok(_) => Ok(true),
            Err(Error::Api { .. } | Error::Authentication { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Poll [`is_request_acknowledged`](Self::is_request_acknowledged) until
    /// it succeeds or `attempts` polls have been made.
    pub async fn wait_for_acknowledgement(
        &self,
        interval: Duration,
        attempts: u32,
    ) -> Result<(), Error> {
        for attempt in 1..=attempts {
            if self.is_request_acknowledged().await? {
                debug!(attempt, "connection request acknowledged");
                return Ok(());
            }
            tokio::time::sleep(interval).await;
        }
        Err(Error::NotAcknowledged)
    }

    /// Request the auth token for the acknowledged client.
    pub async fn request_auth_token(&self) -> Result<SecretString, Error> {
        let body = json!({ "deviceId": self.device_id });
        let text = self
            .send("auth/requestAuthToken", &body, HeaderMap::new())
            .await?;
        let resp: AuthTokenResponse = parse_body(&text)?;
        Ok(SecretString::from(resp.auth_token))
    }

    /// Confirm the token; the service answers with the new client id.
    pub async fn confirm_auth_token(&self, token: &SecretString) -> Result<ConfirmedClient, Error> {
        let body = json!({
            "deviceId": self.device_id,
            "authToken": token.expose_secret(),
        });
        let text = self
            .send("auth/confirmAuthToken", &body, HeaderMap::new())
            .await?;
        parse_body(&text)
    }

    async fn send(
        &self,
        path: &str,
        body: &impl Serialize,
        headers: HeaderMap,
    ) -> Result<String, Error> {
        let url = Url::parse(&format!(
            "{}/hmip/{path}",
            self.rest_url.as_str().trim_end_matches('/')
        ))?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        read_response(resp).await
    }
}

fn registration_headers(access_point_id: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("clientauth"),
        secret_header("CLIENTAUTH", &client_auth_token(access_point_id))?,
    );
    headers.insert(
        HeaderName::from_static("accesspoint-id"),
        secret_header("ACCESSPOINT-ID", &sanitize_access_point_id(access_point_id))?,
    );
    Ok(headers)
}
