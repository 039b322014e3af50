//! Build helpers for copydesk: man pages and shell completions.
//!
//! Run with `cargo xtask <command>`.

use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

const BIN_NAME: &str = "copydesk";

#[derive(Parser)]
#[command(name = "xtask", about = "copydesk development tasks")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
    },
}

fn generate_man_pages(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = copydesk::command();

    let mut buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(out_dir.join(format!("{BIN_NAME}.1")), buffer)?;

    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let name = format!("{BIN_NAME}-{}", sub.get_name());
        let mut buffer = Vec::new();
        Man::new(sub.clone()).title(&name).render(&mut buffer)?;
        fs::write(out_dir.join(format!("{name}.1")), buffer)?;
    }

    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn generate_completions(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = copydesk::command();

    for shell in [
        Shell::Bash,
        Shell::Fish,
        Shell::Zsh,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        generate_to(shell, &mut cmd, BIN_NAME, out_dir)?;
    }

    println!("completions written to {}", out_dir.display());
    Ok(())
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::Man { out } => generate_man_pages(&out),
        Task::Completions { out } => generate_completions(&out),
    }
}
