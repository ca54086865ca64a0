mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use clap::{CommandFactory, Parser};

use hmip_core::Session;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // No arguments at all: help, not an error
    if std::env::args_os().len() <= 1 {
        if let Err(err) = print_help() {
            eprintln!("{:?}", miette::Report::new(err));
        }
        return;
    }

    let cli = Cli::parse();

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn print_help() -> Result<(), CliError> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Completions need neither config nor logging
    if let Some(Command::Completions(ref args)) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "hmip", &mut std::io::stdout());
        return Ok(());
    }

    // Help-only runs never read the config or open the log file
    if cli.command.is_none() && !cli.actions.has_action() {
        return print_help();
    }

    let path = config::config_path(&cli.global);
    let cfg = config::load(&path, &cli.global)?;

    let level = cli.global.debug_level.unwrap_or(cfg.logging.level);
    let _guard = logging::init(level, cfg.logging.file.as_deref())?;
    tracing::debug!(config = %path.display(), level, "configuration loaded");

    match cli.command {
        // Config commands don't need a session
        Some(Command::Config(args)) => {
            commands::config_cmd::handle(args, cfg, &path, cli.global.output).await
        }
        Some(Command::Completions(_)) => Ok(()),

        None => {
            let session_config = config::session_config(&cfg, &path)?;
            let session = Session::connect(&session_config).await?;
            commands::dispatch(&session, &cli.actions, cli.global.output).await
        }
    }
}
