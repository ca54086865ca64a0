//! CLI-side configuration: flag overrides on top of `hmip_config`.
//!
//! Core never sees these types; it receives a pre-built `SessionConfig`.

use std::path::{Path, PathBuf};

use hmip_config::Config;
use hmip_core::SessionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file in use: `--config`/`HMIP_CONFIG`, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(hmip_config::config_path)
}

/// Load file + env configuration, then apply CLI flag overrides.
pub fn load(path: &Path, global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = hmip_config::load_config(path)?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref ap) = global.access_point {
        cfg.access_point = Some(ap.clone());
    }
    if let Some(ref token) = global.auth_token {
        cfg.auth_token = Some(token.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
}

/// Translate the layered config into a `SessionConfig`.
///
/// This is the single boundary where CLI config types cross into core types.
pub fn session_config(cfg: &Config, path: &Path) -> Result<SessionConfig, CliError> {
    hmip_config::to_session_config(cfg).map_err(|err| match CliError::from(err) {
        CliError::NoAccessPoint { .. } => CliError::NoAccessPoint {
            path: path.display().to_string(),
        },
        other => other,
    })
}
