//! Configuration for the hmip CLI.
//!
//! TOML file plus `HMIP_` environment, auth token resolution (env +
//! plaintext + keyring), and translation to `hmip_core::SessionConfig`.
//! The CLI layers its flag overrides on top of what this crate loads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hmip_core::SessionConfig;

/// Keyring service name under which auth tokens are stored.
pub const KEYRING_SERVICE: &str = "hmip";

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no access point configured")]
    MissingAccessPoint,

    #[error("no auth token configured for access point '{access_point}'")]
    NoAuthToken { access_point: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Access point SGTIN (e.g. "3014-F711-A000-0000-0000-0000").
    pub access_point: Option<String>,

    /// Auth token (plaintext; prefer keyring).
    pub auth_token: Option<String>,

    /// Host lookup endpoint.
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_point: None,
            auth_token: None,
            lookup_url: default_lookup_url(),
            timeout: default_timeout(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Numeric level: 10 debug, 20 info, 30 warning, 40 error, 50 critical.
    #[serde(default = "default_level")]
    pub level: u8,

    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_lookup_url() -> String {
    hmip_api::DEFAULT_LOOKUP_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_level() -> u8 {
    30
}

impl Config {
    /// Copy with the plaintext auth token masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            auth_token: self.auth_token.as_ref().map(|_| REDACTED.into()),
            ..self.clone()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "hmip").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hmip");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from defaults, the TOML file at `path`, and `HMIP_*`
/// environment variables (nested keys split on `__`).
///
/// A missing file is not an error; it contributes nothing.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HMIP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_user(access_point: &str) -> String {
    format!("{access_point}/auth-token")
}

/// Resolve the auth token: config value (file or `HMIP_AUTH_TOKEN`), then
/// the system keyring.
pub fn resolve_auth_token(config: &Config, access_point: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref token) = config.auth_token {
        return Ok(SecretString::from(token.clone()));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(access_point)) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    Err(ConfigError::NoAuthToken {
        access_point: access_point.into(),
    })
}

/// Store an auth token in the system keyring.
pub fn store_auth_token(access_point: &str, token: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(access_point))?;
    entry.set_password(token)?;
    Ok(())
}

/// Build a `SessionConfig` from a fully layered Config.
pub fn to_session_config(config: &Config) -> Result<SessionConfig, ConfigError> {
    let access_point = config
        .access_point
        .clone()
        .filter(|ap| !ap.trim().is_empty())
        .ok_or(ConfigError::MissingAccessPoint)?;

    let lookup_url: url::Url = config
        .lookup_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "lookup_url".into(),
            reason: format!("invalid URL: {}", config.lookup_url),
        })?;

    if config.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }

    let auth_token = resolve_auth_token(config, &access_point)?;

    Ok(SessionConfig {
        access_point,
        auth_token,
        lookup_url,
        timeout: Duration::from_secs(config.timeout),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn write(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.lookup_url, hmip_api::DEFAULT_LOOKUP_URL);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.logging.level, 30);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
access_point = "3014-F711-A000-0000-0000-0000"
auth_token = "secret"
timeout = 5

[logging]
level = 10
file = "/tmp/hmip.log"
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.access_point.as_deref(),
            Some("3014-F711-A000-0000-0000-0000")
        );
        assert_eq!(config.timeout, 5);
        assert_eq!(config.logging.level, 10);
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/hmip.log")));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "timeout = \"soon\"");
        assert!(matches!(load_config(&path), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            access_point: Some("3014F711A000000000000000".into()),
            timeout: 12,
            ..Config::default()
        };

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn redacted_masks_token_only() {
        let config = Config {
            access_point: Some("ap".into()),
            auth_token: Some("secret".into()),
            ..Config::default()
        };
        let shown = config.redacted();
        assert_eq!(shown.auth_token.as_deref(), Some(REDACTED));
        assert_eq!(shown.access_point.as_deref(), Some("ap"));
        assert_eq!(Config::default().redacted().auth_token, None);
    }

    #[test]
    fn session_config_requires_access_point() {
        let config = Config {
            auth_token: Some("secret".into()),
            ..Config::default()
        };
        assert!(matches!(
            to_session_config(&config),
            Err(ConfigError::MissingAccessPoint)
        ));
    }

    #[test]
    fn session_config_rejects_bad_lookup_url() {
        let config = Config {
            access_point: Some("ap".into()),
            auth_token: Some("secret".into()),
            lookup_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            to_session_config(&config),
            Err(ConfigError::Validation { ref field, .. }) if field == "lookup_url"
        ));
    }

    #[test]
    fn session_config_uses_plaintext_token() {
        let config = Config {
            access_point: Some("3014-F711-A000-0000-0000-0000".into()),
            auth_token: Some("secret".into()),
            timeout: 7,
            ..Config::default()
        };
        let session = to_session_config(&config).unwrap();
        assert_eq!(session.access_point, "3014-F711-A000-0000-0000-0000");
        assert_eq!(session.auth_token.expose_secret(), "secret");
        assert_eq!(session.timeout, Duration::from_secs(7));
        assert_eq!(session.lookup_url.as_str(), hmip_api::DEFAULT_LOOKUP_URL);
    }
}
