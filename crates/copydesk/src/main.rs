//! copydesk CLI
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use copydesk::{Cli, Commands, commands};
use copydesk_core::config::{Config, ConfigLoader, ConfigSources};

mod observability;

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|e| {
        anyhow!(
            "{what} is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })
}

/// Discover config from `cwd`, layer `--config` on top, and make its paths absolute.
fn load_config(
    cwd: &Utf8Path,
    explicit: Option<&Path>,
) -> anyhow::Result<(Config, ConfigSources)> {
    let mut loader = ConfigLoader::new().with_project_search(cwd);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path.to_path_buf(), "config path")?);
    }
    let (mut config, sources) = loader.load().context("failed to load configuration")?;
    config.resolve_paths(&sources.base_dir(cwd));
    Ok((config, sources))
}

fn run(
    command: Commands,
    json: bool,
    config: Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    match command {
        Commands::CopyEdit(args) => commands::copy_edit::cmd_copy_edit(args, json, &config),
        Commands::Readability(args) => commands::readability::cmd_readability(
            args,
            json,
            config.max_grade,
            config.max_input(),
        ),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to create async runtime for MCP server")?
            .block_on(commands::serve::cmd_serve(args, config)),
    }
}

fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // Without a subcommand clap has already printed help and exited.
    let Some(command) = cli.command.take() else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }
    let cwd = utf8(
        std::env::current_dir().context("failed to determine current directory")?,
        "current directory",
    )?;
    let (config, sources) = load_config(&cwd, cli.config.as_deref())?;

    let obs = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.clone().map(Utf8PathBuf::into_std_path_buf),
    );
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs, filter)
        .context("failed to initialize logging/tracing")?;

    tracing::debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        %cwd,
        config_file = ?sources.primary_file(),
        "CLI initialized"
    );

    run(command, cli.json, config, &sources)
        .inspect_err(|err| tracing::error!(error = %err, "fatal error"))
}
