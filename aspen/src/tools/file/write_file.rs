//! Write-file tool: create or fully overwrite a file under the workspace root.
//!
//! Creates missing parent directories. The containment check applies to the
//! target's parent, so new files can be created but nothing outside the root.

use async_trait::async_trait;
use serde_json::json;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

use super::error::FileToolError;
use super::path::WorkspaceRoot;
use super::{blocking, required_str};

/// Tool name for writing a file.
pub const TOOL_WRITE_FILE: &str = "write_file";

/// Writes `content` to `file_path`, truncating any existing file.
pub fn write_file(
    root: &WorkspaceRoot,
    file_path: &str,
    content: &str,
) -> Result<String, FileToolError> {
    let resolved = root.resolve_for_write(file_path)?;
    if let Some(parent) = resolved.path().parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FileToolError::io("create parent directories for", file_path, e))?;
        }
    }
    std::fs::write(resolved.path(), content)
        .map_err(|e| FileToolError::io("write file", file_path, e))?;
    tracing::info!(path = %resolved.path().display(), bytes = content.len(), "file written");
    Ok(format!("Successfully wrote content to {}", file_path))
}

/// Tool that writes text content to a file under the workspace root.
#[derive(Debug, Clone)]
pub struct WriteFileTool {
    root: WorkspaceRoot,
}

impl WriteFileTool {
    pub fn new(root: WorkspaceRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        TOOL_WRITE_FILE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_WRITE_FILE.to_string(),
            description: Some(
                "Creates a new file or completely overwrites an existing file with the provided \
                 content. Use 'edit_file' for modifications. Input requires 'file_path' (relative \
                 path) and 'content'."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path to the file within the workspace to create or overwrite."
                    },
                    "content": {
                        "type": "string",
                        "description": "The full content to write to the file."
                    }
                },
                "required": ["file_path", "content"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        let file_path = required_str(&args, "file_path")?.to_string();
        let content = required_str(&args, "content")?.to_string();
        let root = self.root.clone();
        let result = blocking(move || write_file(&root, &file_path, &content)).await?;
        Ok(ToolCallContent::new(super::observe(TOOL_WRITE_FILE, result)))
    }
}
