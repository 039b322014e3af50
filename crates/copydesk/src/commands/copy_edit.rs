//! Copy-edit command: spelling, flagged words, heading structure and punctuation.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use copydesk_core::{
    Config, CopyEditReport, DictionarySpellChecker, FlaggedTerms, Language, copy_edit,
};

use super::read_input_file;

/// Arguments for the `copy-edit` subcommand.
#[derive(Args, Debug)]
pub struct CopyEditArgs {
    /// Markdown file to check.
    pub file: Utf8PathBuf,

    /// Flagged word list (overrides config; built-in list when neither is set).
    #[arg(long, value_name = "PATH")]
    pub flagged_words: Option<Utf8PathBuf>,

    /// Spelling dictionary (repeatable; overrides config dictionaries).
    #[arg(long, value_name = "PATH")]
    pub dictionary: Vec<Utf8PathBuf>,

    /// Spell-check language (overrides config).
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Exit with an error when any issue is found.
    #[arg(long)]
    pub strict: bool,
}

/// Run every copy-editing check over a file.
#[instrument(name = "cmd_copy_edit", skip_all, fields(file = %args.file))]
pub fn cmd_copy_edit(args: CopyEditArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let language = args.language.unwrap_or(config.language);
    debug!(
        file = %args.file,
        strict = args.strict,
        %language,
        "executing copy-edit command"
    );

    let doc = read_input_file(&args.file, config.max_input())?;

    let list_path = args.flagged_words.as_ref().or(config.flagged_words.as_ref());
    let terms = FlaggedTerms::load_or_builtin(list_path.map(Utf8PathBuf::as_path))
        .context("failed to load flagged word list")?;

    let dictionaries = if args.dictionary.is_empty() {
        &config.dictionaries
    } else {
        &args.dictionary
    };
    let checker = DictionarySpellChecker::open(dictionaries, language, &config.words)
        .context("failed to load spelling dictionary")?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to create async runtime")?;
    let report = rt
        .block_on(copy_edit(&doc, &terms, &checker, language))
        .with_context(|| format!("failed to copy-edit {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.file, &report);
    }

    if args.strict && report.has_issues() {
        bail!(
            "{} has {} copy-editing issue(s)",
            args.file,
            report.summary.total
        );
    }

    Ok(())
}

fn print_report(file: &Utf8Path, report: &CopyEditReport) {
    if !report.has_issues() {
        println!("{} {file}: no issues found", "PASS:".green());
        return;
    }

    for issue in &report.spelling {
        println!(
            "{file}:{}: {} {}",
            issue.line,
            "spelling".yellow(),
            issue.word.bold()
        );
    }
    for issue in &report.forbidden_words {
        match &issue.suggestion {
            Some(suggestion) => println!(
                "{file}:{}: {} {} (use {})",
                issue.line,
                "flagged".yellow(),
                issue.word.bold(),
                suggestion.green()
            ),
            None => println!(
                "{file}:{}: {} {}",
                issue.line,
                "flagged".yellow(),
                issue.word.bold()
            ),
        }
    }
    for issue in &report.headings {
        println!("{file}:{}: {} {}", issue.line, "heading".yellow(), issue.message);
    }
    for issue in &report.formatting {
        println!(
            "{file}:{}: {} {}",
            issue.line,
            "formatting".yellow(),
            issue.message
        );
    }

    let s = &report.summary;
    println!();
    println!(
        "{} {} total ({} spelling, {} flagged, {} heading, {} formatting)",
        "Summary:".bold(),
        s.total,
        s.spelling,
        s.forbidden_words,
        s.headings,
        s.formatting
    );
}
