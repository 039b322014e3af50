//! Layered configuration.
//!
//! Values are merged from lowest to highest precedence:
//!
//! | Layer | Location |
//! | --- | --- |
//! | defaults | [`Config::default`] |
//! | user | `config.<ext>` in the platform config dir (`~/.config/copydesk/` on Linux) |
//! | project | `.copydesk.<ext>` then `copydesk.<ext>`, in the nearest directory that has one |
//! | explicit | files passed with `--config` |
//! | environment | `COPYDESK_*` variables |
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`. All matches in the chosen
//! project directory are merged in that extension order. The upward search
//! stops at a directory containing `.git`.
//!
//! Paths inside a config file are relative to that file; call
//! [`Config::resolve_paths`] with [`ConfigSources::base_dir`] after loading.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::spelling::Language;

/// Effective settings after all layers are merged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default log verbosity, overridden by `RUST_LOG`, `-q` and `-v`.
    pub log_level: LogLevel,
    /// Directory for the log file. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Spell-check language profile (en, en-us, en-gb, en-ca, en-au).
    pub language: Language,
    /// Flagged word list. The built-in list is used when unset.
    pub flagged_words: Option<Utf8PathBuf>,
    /// Spelling dictionaries (word lists or hunspell `.dic` files).
    ///
    /// When empty, a system dictionary for `language` is searched for.
    pub dictionaries: Vec<Utf8PathBuf>,
    /// Extra words to accept as correctly spelled (product names, jargon).
    pub words: Vec<String>,
    /// Default maximum Flesch-Kincaid grade level for the `readability` command.
    pub max_grade: Option<f64>,
    /// Largest document accepted by the CLI and the MCP tools, in bytes.
    /// Falls back to [`crate::DEFAULT_MAX_INPUT_BYTES`].
    pub max_input_bytes: Option<usize>,
    /// Accept documents of any size. Wins over `max_input_bytes`.
    pub disable_input_limit: bool,
}

impl Config {
    /// The effective input size limit, or `None` when disabled.
    pub fn max_input(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
    }

    /// Make `flagged_words`, `dictionaries` and `log_dir` absolute against `base`.
    pub fn resolve_paths(&mut self, base: &Utf8Path) {
        for path in self
            .flagged_words
            .iter_mut()
            .chain(self.dictionaries.iter_mut())
            .chain(self.log_dir.iter_mut())
        {
            *path = resolve_path(path, base);
        }
    }
}

/// Configured log verbosity.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The config files that fed a [`Config`], grouped by layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Files from the nearest project directory, lowest precedence first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// The per-user config file, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files named on the command line.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Every file in merge order.
    pub fn layers(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
    }

    /// The file merged last, which is the one whose values win.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.layers().last()
    }

    /// Directory that relative config paths are resolved against.
    ///
    /// The primary config file's directory, or `cwd` when no file was loaded.
    pub fn base_dir(&self, cwd: &Utf8Path) -> Utf8PathBuf {
        self.primary_file()
            .and_then(Utf8Path::parent)
            .filter(|dir| !dir.as_str().is_empty())
            .map_or_else(|| cwd.to_path_buf(), Utf8Path::to_path_buf)
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Utf8Path, base: &Utf8Path) -> Utf8PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Extensions tried for every config file name, lowest precedence first.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// File stem shared by project config files and the user config directory.
const APP_NAME: &str = "copydesk";

/// Environment prefix, e.g. `COPYDESK_LANGUAGE=en-gb`.
const ENV_PREFIX: &str = "COPYDESK_";

/// Discovers config files and merges them with figment.
///
/// ```no_run
/// # use copydesk_core::config::ConfigLoader;
/// let (config, sources) = ConfigLoader::new()
///     .with_project_search("docs")
///     .load()?;
/// println!("{:?} from {:?}", config.language, sources.primary_file());
/// # Ok::<(), copydesk_core::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    search_from: Option<Utf8PathBuf>,
    user_layer: bool,
    stop_at: Option<String>,
    extra_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and stops walking at `.git`.
    pub fn new() -> Self {
        Self {
            search_from: None,
            user_layer: true,
            stop_at: Some(".git".to_owned()),
            extra_files: Vec::new(),
        }
    }

    /// Walk upward from `dir` looking for `.copydesk.*` and `copydesk.*`.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_from = Some(dir.as_ref().to_owned());
        self
    }

    /// Toggle the per-user layer (`config.<ext>` in the platform config dir).
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_layer = include;
        self
    }

    /// Stop the upward walk at a directory containing `marker`.
    ///
    /// Config files next to the marker are still picked up.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.stop_at = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.stop_at = None;
        self
    }

    /// Layer `path` on top of everything discovered. Repeated calls stack,
    /// the last one winning.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.extra_files.push(path.as_ref().to_owned());
        self
    }

    /// Find every config file this loader would read, without reading them.
    pub fn discover(&self) -> ConfigSources {
        ConfigSources {
            user_file: self.user_layer.then(user_config_file).flatten(),
            project_files: self
                .search_from
                .as_deref()
                .map(|start| self.project_files(start))
                .unwrap_or_default(),
            explicit_files: self.extra_files.clone(),
        }
    }

    /// Merge defaults, discovered files and `COPYDESK_*` variables.
    ///
    /// Later layers win: defaults, user file, project files, explicit files,
    /// then the environment. The returned [`ConfigSources`] records which
    /// files took part.
    #[tracing::instrument(skip(self), fields(search_from = ?self.search_from))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        let figment = sources
            .layers()
            .fold(
                Figment::new().merge(Serialized::defaults(Config::default())),
                |figment, file| {
                    tracing::debug!(%file, "merging config file");
                    merge_file(figment, file)
                },
            )
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment.extract().map_err(Box::new)?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            language = %config.language,
            files = sources.layers().count(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Config files in the nearest directory (from `start` upward) that has any.
    ///
    /// Within that directory dotfiles come first, then plain names, each in
    /// [`CONFIG_EXTENSIONS`] order.
    fn project_files(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found: Vec<Utf8PathBuf> = [".", ""]
                .iter()
                .flat_map(|prefix| {
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| dir.join(format!("{prefix}{APP_NAME}.{ext}")))
                })
                .filter(|candidate| candidate.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }

            let at_boundary = self
                .stop_at
                .as_deref()
                .is_some_and(|marker| dir != start && dir.join(marker).exists());
            if at_boundary {
                tracing::debug!(%dir, "stopping config search at boundary");
                break;
            }
        }
        Vec::new()
    }
}

/// First `config.<ext>` in the platform config directory for copydesk.
fn user_config_file() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    let dir = Utf8Path::from_path(dirs.config_dir())?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}
