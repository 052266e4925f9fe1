//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes essay scoring to AI assistants over stdio. Like the CLI, this is a
//! presentation layer: each `#[tool]` method delegates to
//! [`essay_scorer_core`] and only handles parameter decoding, input limits,
//! and serialization.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use essay_scorer_core::{EssayAnalyzer, EssayFormat};

use crate::commands::analyze::BLANK_ESSAY_WARNING;

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

/// Parameters for the `score_essay` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreEssayParams {
    /// The essay text.
    pub text: String,
    /// How the text is written: "plain" (default) or "markdown".
    #[serde(default)]
    pub format: EssayFormat,
}

/// MCP server exposing essay scoring to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    analyzer: EssayAnalyzer,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(EssayAnalyzer::new())
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server that scores with `analyzer`.
    pub fn new(analyzer: EssayAnalyzer) -> Self {
        Self {
            analyzer,
            max_input_bytes: Some(essay_scorer_core::DEFAULT_MAX_INPUT_BYTES),
            tool_router: Self::tool_router(),
        }
    }

    /// Reject essays larger than `max` bytes (`None` disables the check).
    #[must_use]
    pub const fn with_max_input_bytes(mut self, max: Option<usize>) -> Self {
        self.max_input_bytes = max;
        self
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

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score an essay.
    #[tool(
        description = "Score an essay (0-100) from vocabulary richness, average sentence length, and length. Returns the score, word counts, keywords, and longest/shortest sentence as JSON."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_essay(
        &self,
        Parameters(params): Parameters<ScoreEssayParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "score_essay",
            format = %params.format,
            text_len = params.text.len(),
            "executing MCP tool"
        );

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }

        if params.text.trim().is_empty() {
            tracing::warn!(tool = "score_essay", "blank essay, skipping analysis");
            return Ok(CallToolResult::error(vec![Content::text(
                BLANK_ESSAY_WARNING,
            )]));
        }

        let report = self.analyzer.analyze_as(&params.text, params.format);
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "score_essay",
            score = report.score,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
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
                "{} MCP server. Use score_essay to score an essay and list its insights.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn score(text: &str, format: EssayFormat) -> Result<CallToolResult, McpError> {
        ProjectServer::default().score_essay(Parameters(ScoreEssayParams {
            text: text.to_string(),
            format,
        }))
    }

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::default();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::default();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn score_essay_tool_returns_report() {
        let result = score("The cat sat. The dog ran fast.", EssayFormat::Plain)
            .expect("score_essay should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(json["total_word_count"], 7);
        assert_eq!(json["unique_word_count"], 6);
        assert_eq!(json["longest_sentence"], "The dog ran fast.");
        assert!(json["score"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn score_essay_tool_strips_markdown() {
        let result = score("# Heading\n\nOne sentence here.", EssayFormat::Markdown)
            .expect("score_essay should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(json["total_word_count"], 3);
    }

    #[test]
    fn blank_essay_is_a_tool_warning() {
        let result = score("   ", EssayFormat::Plain).expect("blank input is not a protocol error");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(extract_text(&result), Some(BLANK_ESSAY_WARNING));
    }

    #[test]
    fn oversized_essay_is_rejected() {
        let server = ProjectServer::default().with_max_input_bytes(Some(4));
        let result = server.score_essay(Parameters(ScoreEssayParams {
            text: "Too long for the limit.".to_string(),
            format: EssayFormat::Plain,
        }));
        assert!(result.is_err());
    }
}
