//! Tool source abstraction: list tools and call a tool.
//!
//! The agent runtime depends on [`ToolSource`] instead of a concrete registry.
//! [`FileToolSource`] is the implementation that exposes the workspace file tools
//! (`read_file`, `list_directory`, `search_file_content`, `write_file`, `edit_file`).
//!
//! Tool results reach the LLM as plain text. [`ToolSource::invoke_tool`] is the
//! boundary where every [`ToolSourceError`] becomes a readable `Error: ...` line.

mod file_tool_source;

pub use file_tool_source::FileToolSource;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification, aligned with MCP `tools/list` result item.
///
/// **Interaction**: Returned by `ToolSource::list_tools()` and `Tool::spec()`;
/// the agent runtime turns it into the tool section of its prompt.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name the runtime dispatches on.
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result of a single tool call.
///
/// Domain failures (access denied, missing file, ambiguous edit) are already
/// rendered into `text` by the tool; only dispatch problems surface as
/// [`ToolSourceError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    pub text: String,
}

impl ToolCallContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors from listing or calling tools.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("tool execution failed: {0}")]
    Transport(String),
}

/// Tool source: list tools and call a tool.
///
/// `list_tools` feeds the prompt; `call_tool` runs one tool with JSON arguments.
/// Hosts that only want text use [`invoke_tool`](Self::invoke_tool).
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// List available tools.
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    /// Call a tool by name with JSON arguments.
    async fn call_tool(&self, name: &str, arguments: Value)
        -> Result<ToolCallContent, ToolSourceError>;

    /// Call a tool and flatten any error into observation text. Never fails.
    async fn invoke_tool(&self, name: &str, arguments: Value) -> String {
        match self.call_tool(name, arguments).await {
            Ok(content) => content.text,
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "tool call rejected");
                format!("Error: {}", e)
            }
        }
    }
}
