//! Edit-file tool: apply an elided edit script to an existing file under the workspace root.
//!
//! The script format and reconstruction rules live in
//! [`edit_script`](super::edit_script); this module resolves the path, reads the
//! original, writes the rebuilt file, and renders failures together with the
//! script so the agent can retry with a corrected one.

use async_trait::async_trait;
use serde_json::json;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

use super::edit_script::{apply_edit_script, split_lines_keep_ends, EditScript};
use super::error::{EntryKind, FileToolError};
use super::path::WorkspaceRoot;
use super::{blocking, required_str};

/// Tool name for editing a file.
pub const TOOL_EDIT_FILE: &str = "edit_file";

const DESCRIPTION: &str = "\
Applies structured code edits to an existing file. Takes a 'code_edit' string that specifies \
exact changes, using comments like '# ... existing code ...' (adjust comment style for the \
target language) to indicate unchanged blocks. Use 'write_file' to create or fully replace a \
file. Input requires 'file_path' (relative path) and 'code_edit'.

Rules:
- Lines that are not markers are inserted; they never replace original lines on their own.
- Two markers in a row skip the original file forward to the first line after them, which must \
match an existing line (ignoring surrounding whitespace).
- Two markers at the very end drop the rest of the file; otherwise everything after your last \
edit is kept.";

/// Rebuilds `file_path` from its current content and `code_edit`, then writes it back.
pub fn edit_file(
    root: &WorkspaceRoot,
    file_path: &str,
    code_edit: &str,
) -> Result<String, FileToolError> {
    let resolved = root.resolve(file_path)?;
    if !resolved.path().is_file() {
        return Err(FileToolError::NotFound {
            kind: EntryKind::File,
            path: file_path.to_string(),
        });
    }
    let original = std::fs::read_to_string(resolved.path())
        .map_err(|e| FileToolError::io("read file", file_path, e))?;
    let original_lines = split_lines_keep_ends(&original);
    let script = EditScript::parse(code_edit);
    let new_lines = apply_edit_script(&original_lines, &script)?;
    std::fs::write(resolved.path(), new_lines.concat())
        .map_err(|e| FileToolError::io("write file", file_path, e))?;
    tracing::info!(
        path = %resolved.path().display(),
        original_lines = original_lines.len(),
        new_lines = new_lines.len(),
        "edit applied"
    );
    Ok(format!("Successfully applied edits to {}", file_path))
}

/// Observation text for a failed edit. Always carries the attempted script.
fn edit_failure_text(err: &FileToolError, code_edit: &str) -> String {
    match err {
        // Already embeds the script.
        FileToolError::AmbiguousEdit { .. } => err.to_observation(),
        _ => format!("{}\nEdit attempted:\n{}", err.to_observation(), code_edit),
    }
}

/// Tool that applies an elided edit script to one file.
#[derive(Debug, Clone)]
pub struct EditFileTool {
    root: WorkspaceRoot,
}

impl EditFileTool {
    pub fn new(root: WorkspaceRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for EditFileTool {
    fn name(&self) -> &str {
        TOOL_EDIT_FILE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_EDIT_FILE.to_string(),
            description: Some(DESCRIPTION.to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path to the file within the workspace to edit."
                    },
                    "code_edit": {
                        "type": "string",
                        "description": "The precise code changes to apply. Use comments like '# ... existing code ...' (adjusting for language) to represent unchanged sections between your edits."
                    }
                },
                "required": ["file_path", "code_edit"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        let file_path = required_str(&args, "file_path")?.to_string();
        let code_edit = required_str(&args, "code_edit")?.to_string();
        if code_edit.trim().is_empty() {
            return Err(ToolSourceError::InvalidInput(
                "code_edit must contain at least one line".to_string(),
            ));
        }
        let root = self.root.clone();
        let text = blocking(move || match edit_file(&root, &file_path, &code_edit) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(tool = TOOL_EDIT_FILE, path = %file_path, error = %e, "edit failed");
                edit_failure_text(&e, &code_edit)
            }
        })
        .await?;
        Ok(ToolCallContent::new(text))
    }
}
