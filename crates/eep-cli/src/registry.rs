//! Tool registry for the command line host.
//!
//! Subcommands are dispatched to tools by name through this registry.

use std::collections::HashMap;

use tracing::Instrument;

use eep_tools::{DumpSource, DumpTool, ToolError, ToolOutcome, ToolResult};

/// Metadata about a registered tool (used by the `tools` subcommand).
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

/// Name-indexed dump tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn DumpTool>>,
    /// Map from tool name → index into `tools`.
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn DumpTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Build with every tool from `eep-tools`.
    pub fn with_defaults() -> Self {
        Self::new(eep_tools::tools::all_tools())
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn DumpTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Execute a tool by name.
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        source: &dyn DumpSource,
    ) -> ToolOutcome<ToolResult> {
        let tool = self
            .lookup(name)
            .ok_or_else(|| ToolError::InvalidArgument(format!("unknown tool: {name}")))?;
        let span = tracing::info_span!("tool", name);
        tool.execute(args, source).instrument(span).await
    }

    /// List all registered tools with metadata.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect()
    }

    /// Total number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
