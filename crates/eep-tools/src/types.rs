//! Tool result type and the DumpTool trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolOutcome;

// ── Tool Result ───────────────────────────────────────────────

/// Result of executing a dump tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that produced this result.
    pub tool_name: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Structured result data (JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Error message if success is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(
        tool_name: impl Into<String>,
        data: serde_json::Value,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            data: Some(data),
            summary: Some(summary.into()),
            error: None,
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            data: None,
            summary: None,
            error: Some(error.into()),
        }
    }
}

// ── DumpTool Trait ────────────────────────────────────────────

/// Trait for dump tools.
///
/// Arguments arrive as a JSON object so the same tool can be driven from the
/// command line, tests, or any other host.
#[async_trait]
pub trait DumpTool: Send + Sync {
    /// Tool name (e.g., "read_dump").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with JSON arguments against a dump source.
    async fn execute(
        &self,
        args: serde_json::Value,
        source: &dyn crate::source::DumpSource,
    ) -> ToolOutcome<ToolResult>;
}
