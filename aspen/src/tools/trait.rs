use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// A single tool the agent can call by name.
///
/// Each tool has a unique name, a specification (description and JSON schema)
/// and the call logic. The workspace tools implement it and are collected in
/// [`ToolRegistry`](super::ToolRegistry).
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use aspen::tools::Tool;
/// use aspen::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "echo".to_string(),
///             description: Some("Returns its input".to_string()),
///             input_schema: serde_json::json!({"type": "object"}),
///         }
///     }
///
///     async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent::new(args.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the agent uses to select this tool.
    fn name(&self) -> &str;

    /// Name, description for the model, and JSON schema for the arguments.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool.
    ///
    /// Operation failures (path denied, file missing, ambiguous edit, ...) come
    /// back as `Ok` with `Error: ...` text so the agent can react to them.
    ///
    /// # Errors
    ///
    /// - [`ToolSourceError::InvalidInput`] for missing or mistyped arguments
    /// - [`ToolSourceError::Transport`] when the blocking task could not run
    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError>;
}
