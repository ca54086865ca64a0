//! CLI error types with miette diagnostics.
//!
//! Only fatal errors become a `CliError`. Failures of a single action are
//! logged by the dispatcher and never reach this type.

use miette::Diagnostic;
use thiserror::Error;

use hmip_config::ConfigError;
use hmip_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the HomematicIP cloud at {url}")]
    #[diagnostic(
        code(hmip::connection_failed),
        help("Check your network connection and the configured lookup_url.\n{reason}")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(hmip::timeout),
        help("Increase the timeout with --timeout or `timeout` in the config file.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hmip::auth_failed),
        help(
            "Verify the access point SGTIN and auth token.\n\
             Register a new token with: hmip config init"
        )
    )]
    AuthFailed { message: String },

    #[error("No auth token configured for access point '{access_point}'")]
    #[diagnostic(
        code(hmip::no_credentials),
        help(
            "Run: hmip config init\n\
             Or pass --auth-token / set HMIP_AUTH_TOKEN."
        )
    )]
    NoCredentials { access_point: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No access point configured")]
    #[diagnostic(
        code(hmip::no_access_point),
        help(
            "Run: hmip config init\n\
             Or pass --access-point / set HMIP_ACCESS_POINT.\n\
             Config file: {path}"
        )
    )]
    NoAccessPoint { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hmip::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(hmip::config))]
    Config { message: String },

    // ── Service ──────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(hmip::api_error))]
    ApiError { code: String, message: String },

    // ── Logging / IO / Serialization ─────────────────────────────────
    #[error("Cannot open log file {path}: {reason}")]
    #[diagnostic(code(hmip::log_file))]
    LogFile { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(hmip::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NoAccessPoint { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Rejected {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| s.to_string()))
                    .unwrap_or_else(|| "rejected".into()),
                message,
            },

            // Device and zone errors are logged per action and never end the run
            other => CliError::ApiError {
                code: "internal".into(),
                message: other.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingAccessPoint => CliError::NoAccessPoint {
                path: String::new(),
            },
            ConfigError::NoAuthToken { access_point } => CliError::NoCredentials { access_point },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
