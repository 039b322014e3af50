//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use copydesk_core::{Config, DictionarySpellChecker, FlaggedTerms};

use crate::server::CopydeskServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Load the checker and word list once, then serve MCP requests until stdin closes.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let terms = FlaggedTerms::load_or_builtin(config.flagged_words.as_deref())
        .context("failed to load flagged word list")?;
    let checker =
        DictionarySpellChecker::open(&config.dictionaries, config.language, &config.words)
            .context("failed to load spelling dictionary")?;

    info!(
        language = %config.language,
        flagged_terms = terms.len(),
        dictionary_words = checker.len(),
        "starting MCP server on stdio"
    );

    let server = CopydeskServer::new(checker, terms, config.language, config.max_input());
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server failed")?;

    info!("MCP server stopped");
    Ok(())
}
