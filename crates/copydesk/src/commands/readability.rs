//! Readability command: Flesch scores per H2 section plus long-text flags.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use copydesk_core::flags::FlagKind;
use copydesk_core::{ReadabilityReport, readability};

use super::read_input_file;

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Maximum acceptable grade level.
    #[arg(long)]
    pub max_grade: Option<f64>,
}

/// Score readability of a file.
#[instrument(name = "cmd_readability", skip_all, fields(file = %args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    config_max_grade: Option<f64>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, max_grade = ?args.max_grade, "executing readability command");

    let doc = read_input_file(&args.file, max_input_bytes)?;
    let max_grade = args.max_grade.or(config_max_grade);
    let report = readability(&doc);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let grade = report.overall.flesch_kincaid_grade;
    match max_grade {
        Some(max) if report.overall.over_grade(max) => bail!(
            "{} scores {grade:.1} (max: {max:.0}). Simplify sentences or reduce jargon.",
            args.file,
        ),
        Some(max) if !global_json => {
            println!(
                "{} {} scores {grade:.1} (max: {max:.0})",
                "PASS:".green(),
                args.file,
            );
        }
        _ => {}
    }

    Ok(())
}

fn print_report(report: &ReadabilityReport) {
    let overall = &report.overall;
    println!(
        "{} grade {:.1}, reading ease {:.1} ({} words, {} sentences)",
        "Overall:".bold(),
        overall.flesch_kincaid_grade,
        overall.flesch_reading_ease,
        overall.word_count,
        overall.sentence_count,
    );

    for (label, scores) in &report.sections {
        println!(
            "  {}: grade {:.1}, reading ease {:.1} ({} words)",
            label.cyan(),
            scores.flesch_kincaid_grade,
            scores.flesch_reading_ease,
            scores.word_count,
        );
    }

    if !report.flags.is_empty() {
        println!();
        for flag in &report.flags {
            let what = match flag.kind {
                FlagKind::LongSentence => format!("long sentence ({} words)", flag.value),
                FlagKind::LongParagraph => format!("long paragraph ({} sentences)", flag.value),
            };
            println!(
                "line {} [{}] {}: {}",
                flag.line,
                flag.section,
                what.yellow(),
                flag.text.dimmed()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_doc(dir: &tempfile::TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("doc.md")).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    const SIMPLE: &str = "## Start\n\nThe cat sat on the mat. The dog ran fast.\n";

    #[test]
    fn passes_under_max_grade() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(&dir, SIMPLE);
        let args = ReadabilityArgs {
            file,
            max_grade: Some(8.0),
        };
        assert!(cmd_readability(args, false, None, None).is_ok());
    }

    #[test]
    fn fails_over_config_max_grade() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(
            &dir,
            "## Anatomy\n\nEvery interactive component exposes accessibility \
             parameters requiring documentation of dependency relationships.\n",
        );
        let args = ReadabilityArgs {
            file,
            max_grade: None,
        };
        let err = cmd_readability(args, true, Some(6.0), None).unwrap_err();
        assert!(err.to_string().contains("max: 6"), "{err}");
    }

    #[test]
    fn flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(&dir, SIMPLE);
        let args = ReadabilityArgs {
            file,
            max_grade: Some(20.0),
        };
        assert!(cmd_readability(args, false, Some(-5.0), None).is_ok());
    }
}
