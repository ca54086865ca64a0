// HomematicIP REST client
//
// Wraps `reqwest::Client` with the auth headers, `{urlREST}/hmip/{path}`
// URL construction, and status/body handling. Endpoint groups (home,
// devices) are implemented as inherent methods in separate files so this
// module stays focused on transport mechanics.

use reqwest::header::{HeaderMap, HeaderName};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{ClientCharacteristics, client_auth_token};
use crate::error::Error;
use crate::models::HostLookup;
use crate::transport::{TransportConfig, secret_header};

/// Everything needed to open a REST session against an access point.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub access_point_id: String,
    pub auth_token: SecretString,
    /// Host lookup endpoint; the REST host is discovered through it.
    pub lookup_url: Url,
    pub transport: TransportConfig,
}

/// Raw HTTP client for the HomematicIP cloud.
///
/// Every call is a `POST` with a JSON body. Responses are returned parsed;
/// non-success statuses become [`Error::Authentication`] or [`Error::Api`].
pub struct HmipClient {
    http: reqwest::Client,
    rest_url: Url,
    characteristics: ClientCharacteristics,
}

impl HmipClient {
    /// Resolve the REST host for the access point and build a client
    /// carrying its auth headers.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, Error> {
        let characteristics = ClientCharacteristics::new(&config.access_point_id);
        let headers = auth_headers(&config.access_point_id, &config.auth_token)?;
        let http = config.transport.build_client_with_headers(headers)?;

        let host = lookup_host(&http, &config.lookup_url, &characteristics).await?;
        let rest_url = Url::parse(&host.url_rest)?;
        debug!(rest = %rest_url, "resolved REST host");

        Ok(Self {
            http,
            rest_url,
            characteristics,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and a known REST
    /// host, skipping the lookup.
    pub fn with_client(http: reqwest::Client, rest_url: Url, access_point_id: &str) -> Self {
        Self {
            http,
            rest_url,
            characteristics: ClientCharacteristics::new(access_point_id),
        }
    }

    /// The resolved REST base URL.
    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    /// The client characteristics sent with state queries.
    pub fn characteristics(&self) -> &ClientCharacteristics {
        &self.characteristics
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{rest}/hmip/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}/hmip/{path}", self.rest_url.as_str().trim_end_matches('/'));
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST a JSON body and parse the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let text = self.send(path, body, HeaderMap::new()).await?;
        parse_body(&text)
    }

    /// POST a JSON body for a command whose response body is irrelevant.
    pub(crate) async fn post_command(
        &self,
        path: &str,
        body: &impl Serialize,
        headers: HeaderMap,
    ) -> Result<(), Error> {
        self.send(path, body, headers).await.map(|_| ())
    }

    async fn send(
        &self,
        path: &str,
        body: &impl Serialize,
        headers: HeaderMap,
    ) -> Result<String, Error> {
        let url = self.api_url(path)?;
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

// ── Shared helpers ───────────────────────────────────────────────────

/// `AUTHTOKEN` + `CLIENTAUTH` headers for an access point.
fn auth_headers(access_point_id: &str, auth_token: &SecretString) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("authtoken"),
        secret_header("AUTHTOKEN", auth_token.expose_secret())?,
    );
    headers.insert(
        HeaderName::from_static("clientauth"),
        secret_header("CLIENTAUTH", &client_auth_token(access_point_id))?,
    );
    Ok(headers)
}

/// Ask the lookup service which REST host serves this access point.
pub(crate) async fn lookup_host(
    http: &reqwest::Client,
    lookup_url: &Url,
    characteristics: &ClientCharacteristics,
) -> Result<HostLookup, Error> {
    debug!("looking up host at {}", lookup_url);

    let resp = http
        .post(lookup_url.clone())
        .json(characteristics)
        .send()
        .await
        .map_err(Error::Transport)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Lookup {
            message: format!("HTTP {status}: {body}"),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    let host: HostLookup = parse_body(&body)?;
    if host.url_rest.is_empty() {
        return Err(Error::Lookup {
            message: "no REST URL in lookup response".into(),
        });
    }
    Ok(host)
}

/// Map the HTTP status and return the body text on success.
pub(crate) async fn read_response(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if status.is_success() {
        return Ok(body);
    }

    let code = error_code(&body);
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: code.unwrap_or_else(|| format!("HTTP {status}")),
        });
    }

    Err(Error::Api {
        message: code.clone().unwrap_or_else(|| body.clone()),
        code,
        status: status.as_u16(),
    })
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

/// Pull `errorCode` out of an error body, if it is JSON and has one.
fn error_code(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("errorCode")?
        .as_str()
        .map(str::to_owned)
}

/// Header map holding a single optional `PIN` header.
pub(crate) fn pin_header(pin: Option<&str>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    if let Some(pin) = pin.filter(|p| !p.is_empty()) {
        headers.insert(HeaderName::from_static("pin"), secret_header("PIN", pin)?);
    }
    Ok(headers)
}
