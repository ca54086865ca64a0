//! Config subcommand handlers.

use std::path::Path;
use std::time::Duration;

use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::ExposeSecret;

use hmip_api::{Registration, TransportConfig};
use hmip_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Seconds between acknowledgement polls while waiting for the button press.
const ACK_POLL_INTERVAL: Duration = Duration::from_secs(1);
const ACK_POLL_ATTEMPTS: u32 = 120;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// The config as text, auth token masked.
fn render_config(cfg: &Config, format: OutputFormat) -> Result<String, CliError> {
    let shown = cfg.redacted();
    match format {
        OutputFormat::Text | OutputFormat::Table => {
            toml::to_string_pretty(&shown).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::Json => output::render_json(&shown),
        OutputFormat::Yaml => output::render_yaml(&shown),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: ConfigArgs,
    cfg: Config,
    path: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let out = render_config(&cfg, format)?;
            output::print_output(out.trim_end());
            Ok(())
        }
        ConfigCommand::Init => init(cfg, path).await,
    }
}

/// Interactive registration: announce a new client, wait for the button
/// press on the access point, fetch and confirm a token, then save.
async fn init(mut cfg: Config, path: &Path) -> Result<(), CliError> {
    eprintln!("HomematicIP configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    // 1. Access point
    let mut ap_prompt = Input::<String>::new().with_prompt("Access point SGTIN");
    if let Some(ref ap) = cfg.access_point {
        ap_prompt = ap_prompt.default(ap.clone());
    }
    let access_point = ap_prompt.interact_text().map_err(prompt_err)?;
    if hmip_api::sanitize_access_point_id(&access_point).is_empty() {
        return Err(CliError::Validation {
            field: "access_point".into(),
            reason: format!("'{access_point}' contains no SGTIN digits"),
        });
    }

    // 2. Client name and optional pin
    let device_name: String = Input::new()
        .with_prompt("Client name")
        .default("hmip".into())
        .interact_text()
        .map_err(prompt_err)?;
    let pin = Password::new()
        .with_prompt("Pin (leave empty if none is set)")
        .allow_empty_password(true)
        .interact()
        .map_err(prompt_err)?;
    let pin = Some(pin.as_str()).filter(|p| !p.is_empty());

    // 3. Register
    let lookup_url: url::Url = cfg.lookup_url.parse().map_err(|_| CliError::Validation {
        field: "lookup_url".into(),
        reason: format!("invalid URL: {}", cfg.lookup_url),
    })?;
    let transport = TransportConfig {
        timeout: Duration::from_secs(cfg.timeout),
    };
    let registration = Registration::start(&access_point, &lookup_url, &transport)
        .await
        .map_err(hmip_core::CoreError::from)?;
    registration
        .connection_request(&device_name, pin)
        .await
        .map_err(hmip_core::CoreError::from)?;

    let pb = spinner("Press the blue button on the access point");
    let acknowledged = registration
        .wait_for_acknowledgement(ACK_POLL_INTERVAL, ACK_POLL_ATTEMPTS)
        .await;
    pb.finish_and_clear();
    acknowledged.map_err(hmip_core::CoreError::from)?;

    let token = registration
        .request_auth_token()
        .await
        .map_err(hmip_core::CoreError::from)?;
    let client = registration
        .confirm_auth_token(&token)
        .await
        .map_err(hmip_core::CoreError::from)?;
    eprintln!("   ✓ Registered client {}", client.client_id);

    // 4. Token storage
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the auth token?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        hmip_config::store_auth_token(&access_point, token.expose_secret())?;
        eprintln!("   ✓ Auth token stored in system keyring");
        cfg.auth_token = None;
    } else {
        cfg.auth_token = Some(token.expose_secret().to_owned());
    }

    // 5. Write config
    cfg.access_point = Some(access_point);
    hmip_config::save_config(&cfg, path)?;

    eprintln!("\n✓ Configuration written to {}", path.display());
    eprintln!("\n  Test it: hmip --list-devices");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            access_point: Some("3014-F711-A000-0000-0000-0001".into()),
            auth_token: Some("very-secret".into()),
            ..Config::default()
        }
    }

    #[test]
    fn show_never_prints_the_token() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
            let out = render_config(&config(), format).unwrap();
            assert!(!out.contains("very-secret"), "{format:?}: {out}");
            assert!(out.contains("3014-F711-A000-0000-0000-0001"));
        }
    }

    #[test]
    fn show_text_is_toml() {
        let out = render_config(&config(), OutputFormat::Text).unwrap();
        let parsed: Config = toml::from_str(&out).unwrap();
        assert_eq!(parsed.timeout, 30);
        assert_eq!(parsed.logging.level, 30);
    }
}
