//! Logging setup: stderr output plus an optional non-blocking log file.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the `-q`/`-v`
//! flags, otherwise from the configured `log_level`. Stdout is never written
//! to, so `--json` output stays clean.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "COPYDESK_LOG_PATH";
const LOG_DIR_ENV: &str = "COPYDESK_LOG_DIR";
const DEFAULT_LOG_FILE: &str = "copydesk.log";

/// Where (if anywhere) log lines are written besides stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Explicit log file path.
    pub log_path: Option<PathBuf>,
    /// Directory for `copydesk.log`, used when no explicit path is set.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `COPYDESK_LOG_PATH` / `COPYDESK_LOG_DIR`, falling back to the config's `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn from_values(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path.filter(|p| !p.as_os_str().is_empty()),
            log_dir: env_dir.filter(|p| !p.as_os_str().is_empty()).or(config_dir),
        }
    }

    /// Directory and file name of the log file, if file logging is on.
    fn file_target(&self) -> Option<(PathBuf, String)> {
        if let Some(path) = &self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let name = path
                .file_name()
                .map_or_else(|| DEFAULT_LOG_FILE.to_string(), |n| n.to_string_lossy().into_owned());
            return Some((dir, name));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), DEFAULT_LOG_FILE.to_string()))
    }
}

/// Keeps the background log writer alive; drop it to flush.
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// The level directive implied by the CLI flags.
fn level_directive(quiet: bool, verbose: u8, configured: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => configured,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Build the log filter. `RUST_LOG` wins over everything else.
pub fn env_filter(quiet: bool, verbose: u8, configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(quiet, verbose, configured)))
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());

    let (file_layer, guard) = match config.file_target() {
        Some((dir, name)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name)
                .build(&dir)
                .with_context(|| format!("failed to open log file in {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(ObservabilityGuard { _file: guard })
}
