//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes the copy-editing and readability reports over the MCP
//! protocol, making them available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library that
//! the CLI commands use, and each `#[tool]` method delegates to a core entry
//! point. The spell checker and flagged word list are loaded once at startup
//! and shared by every call.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use copydesk_core::{
    DictionarySpellChecker, FlaggedTerms, Language, RawDocument, ReadabilityReport, copy_edit,
    readability,
};

/// Name given to documents submitted as inline text.
const INLINE_DOCUMENT: &str = "<input>";

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `copy_edit` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CopyEditParams {
    /// The Markdown document text.
    pub text: String,
    /// Spell-check language profile. Defaults to the server's configured language.
    pub language: Option<Language>,
}

/// Parameters for the `score_readability` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreReadabilityParams {
    /// The Markdown document text.
    pub text: String,
    /// Maximum acceptable Flesch-Kincaid grade level for the whole document.
    pub max_grade: Option<f64>,
}

/// Readability report plus the outcome of the optional grade gate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GatedReadability {
    #[serde(flatten)]
    report: ReadabilityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_grade: Option<f64>,
    over_max: bool,
}

/// MCP server exposing copydesk reports to AI assistants.
#[derive(Clone)]
pub struct CopydeskServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    checker: Arc<DictionarySpellChecker>,
    terms: Arc<FlaggedTerms>,
    language: Language,
    max_input_bytes: Option<usize>,
}

#[tool_router]
impl CopydeskServer {
    /// Create a server around a loaded spell checker and word list.
    pub fn new(
        checker: DictionarySpellChecker,
        terms: FlaggedTerms,
        language: Language,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            checker: Arc::new(checker),
            terms: Arc::new(terms),
            language,
            max_input_bytes,
        }
    }

    fn inline_document(&self, text: String) -> Result<RawDocument, McpError> {
        let doc = RawDocument::from_text(INLINE_DOCUMENT, text);
        doc.check_size(self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        Ok(doc)
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "language": self.language,
            "flaggedTerms": self.terms.len(),
            "dictionaryWords": self.checker.len(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Copy-edit a Markdown document.
    #[tool(
        description = "Copy-edit Markdown text. Returns spelling, flagged-word, heading and punctuation issues with line numbers and a summary."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn copy_edit(
        &self,
        Parameters(params): Parameters<CopyEditParams>,
    ) -> Result<CallToolResult, McpError> {
        let language = params.language.unwrap_or(self.language);
        tracing::debug!(tool = "copy_edit", %language, "executing MCP tool");

        let doc = self.inline_document(params.text)?;
        let report = copy_edit(&doc, &self.terms, self.checker.as_ref(), language)
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "copy_edit",
            total = report.summary.total,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Score readability per H2 section.
    #[tool(
        description = "Score readability of Markdown text. Returns overall and per-section Flesch-Kincaid grade and reading ease, plus long-sentence and long-paragraph flags."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_readability(
        &self,
        Parameters(params): Parameters<ScoreReadabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "score_readability", max_grade = ?params.max_grade, "executing MCP tool");

        let doc = self.inline_document(params.text)?;
        let report = readability(&doc);
        let over_max = params
            .max_grade
            .is_some_and(|max| report.overall.over_grade(max));
        let grade = report.overall.flesch_kincaid_grade;

        let gated = GatedReadability {
            report,
            max_grade: params.max_grade,
            over_max,
        };
        let json = serde_json::to_string_pretty(&gated)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "score_readability", grade, over_max, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for CopydeskServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use copy_edit for spelling, word choice, headings and punctuation; \
                 use score_readability for per-section readability scores.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
