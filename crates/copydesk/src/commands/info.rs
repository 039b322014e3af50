//! `copydesk info`: package metadata and the effective configuration.

use clap::Args;
use copydesk_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand. Output format follows `--json`.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

const PACKAGE: PackageInfo = PackageInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    description: env!("CARGO_PKG_DESCRIPTION"),
    repository: env!("CARGO_PKG_REPOSITORY"),
    license: env!("CARGO_PKG_LICENSE"),
};

/// The parts of [`Config`] worth showing, already rendered to strings.
#[derive(Serialize)]
struct ConfigInfo {
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    flagged_words: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dictionaries: Vec<String>,
    extra_words: usize,
    max_grade: Option<f64>,
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn new(config: &Config, sources: &ConfigSources) -> Self {
        let display = |path: &camino::Utf8Path| path.to_string();
        Self {
            config_file: sources.primary_file().map(display),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_deref().map(display),
            language: config.language.to_string(),
            flagged_words: config.flagged_words.as_deref().map(display),
            dictionaries: config.dictionaries.iter().map(|p| display(p)).collect(),
            extra_words: config.words.len(),
            max_grade: config.max_grade,
            max_input_bytes: config.max_input(),
        }
    }

    /// Label and value pairs for the "Configuration" block.
    fn settings(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Config file",
                self.config_file
                    .clone()
                    .unwrap_or_else(|| "none loaded".into()),
            ),
            ("Log level", self.log_level.into()),
            (
                "Log directory",
                self.log_dir.clone().unwrap_or_else(|| "not set".into()),
            ),
        ]
    }

    /// Label and value pairs for the "Checks" block.
    fn checks(&self) -> Vec<(&'static str, String)> {
        let dictionaries = if self.dictionaries.is_empty() {
            format!("system ({})", self.language)
        } else {
            self.dictionaries.join(", ")
        };
        vec![
            ("Language", self.language.clone()),
            (
                "Flagged words",
                self.flagged_words
                    .clone()
                    .unwrap_or_else(|| "built-in list".into()),
            ),
            ("Dictionaries", dictionaries),
            ("Extra words", self.extra_words.to_string()),
            (
                "Max grade",
                self.max_grade
                    .map_or_else(|| "not set".into(), |grade| format!("{grade:.1}")),
            ),
            (
                "Input limit",
                self.max_input_bytes
                    .map_or_else(|| "disabled".into(), |bytes| format!("{bytes} bytes")),
            ),
        ]
    }
}

#[derive(Serialize)]
struct InfoReport {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

fn print_block(title: &str, rows: &[(&str, String)]) {
    println!();
    println!("{}", title.bold().underline());
    for (label, value) in rows {
        println!("{}: {value}", label.dimmed());
    }
}

/// Print package metadata and the effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json = global_json, "executing info command");
    let report = InfoReport {
        package: PACKAGE,
        config: ConfigInfo::new(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", PACKAGE.name.bold(), PACKAGE.version.green());
    for line in [PACKAGE.description, PACKAGE.license, PACKAGE.repository] {
        if !line.is_empty() {
            println!("{line}");
        }
    }
    print_block("Configuration", &report.config.settings());
    print_block("Checks", &report.config.checks());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use copydesk_core::Language;

    fn value<'a>(rows: &'a [(&str, String)], label: &str) -> &'a str {
        rows.iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn both_output_modes_succeed() {
        for json in [false, true] {
            cmd_info(InfoArgs {}, json, &Config::default(), &ConfigSources::default()).unwrap();
        }
    }

    #[test]
    fn defaults_render_as_fallback_labels() {
        let info = ConfigInfo::new(&Config::default(), &ConfigSources::default());
        let settings = info.settings();
        let checks = info.checks();

        assert_eq!(value(&settings, "Config file"), "none loaded");
        assert_eq!(value(&settings, "Log directory"), "not set");
        assert_eq!(value(&checks, "Flagged words"), "built-in list");
        assert_eq!(value(&checks, "Dictionaries"), "system (en)");
        assert_eq!(value(&checks, "Max grade"), "not set");
        assert_eq!(
            value(&checks, "Input limit"),
            format!("{} bytes", copydesk_core::DEFAULT_MAX_INPUT_BYTES)
        );
    }

    #[test]
    fn configured_values_are_reported() {
        let config = Config {
            language: Language::EnGb,
            dictionaries: vec![Utf8PathBuf::from("/dict/a.dic"), Utf8PathBuf::from("b.txt")],
            words: vec!["copydesk".into(), "rmcp".into()],
            max_grade: Some(9.0),
            disable_input_limit: true,
            ..Config::default()
        };
        let sources = ConfigSources {
            explicit_files: vec![Utf8PathBuf::from("/etc/copydesk.toml")],
            ..ConfigSources::default()
        };
        let info = ConfigInfo::new(&config, &sources);
        let checks = info.checks();

        assert_eq!(info.config_file.as_deref(), Some("/etc/copydesk.toml"));
        assert_eq!(value(&checks, "Language"), "en-gb");
        assert_eq!(value(&checks, "Dictionaries"), "/dict/a.dic, b.txt");
        assert_eq!(value(&checks, "Extra words"), "2");
        assert_eq!(value(&checks, "Max grade"), "9.0");
        assert_eq!(value(&checks, "Input limit"), "disabled");
    }

    #[test]
    fn json_keeps_null_limits_visible() {
        let config = Config {
            disable_input_limit: true,
            ..Config::default()
        };
        let json = serde_json::to_value(InfoReport {
            package: PACKAGE,
            config: ConfigInfo::new(&config, &ConfigSources::default()),
        })
        .unwrap();

        assert_eq!(json["name"], "copydesk");
        assert!(json["config"]["max_input_bytes"].is_null());
        assert!(json["config"]["config_file"].is_null());
        assert!(json["config"].get("dictionaries").is_none());
    }
}
