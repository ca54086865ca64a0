//! Man pages for `hmip` and its subcommands, written to `$OUT_DIR/man`.

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;

// Only the parser types are needed here; the action helpers stay unused
#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        return Ok(());
    };
    let man_dir = PathBuf::from(out_dir).join("man");
    std::fs::create_dir_all(&man_dir)?;

    clap_mangen::generate_to(cli::Cli::command(), &man_dir)
}
