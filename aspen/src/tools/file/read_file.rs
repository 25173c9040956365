//! Read-file tool: return a bounded prefix of a file under the workspace root.
//!
//! Exposes `read_file` as a tool for the LLM. Reads at most the configured byte
//! limit and appends a truncation notice when the file continues past it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use serde_json::json;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

use super::error::{EntryKind, FileToolError};
use super::path::WorkspaceRoot;
use super::{blocking, required_str};

/// Tool name for reading a file.
pub const TOOL_READ_FILE: &str = "read_file";

/// Default byte limit for one read.
pub const DEFAULT_READ_LIMIT: usize = 5000;

/// Appended when the file has bytes past the limit.
pub const TRUNCATION_NOTICE: &str = "\n... (file truncated due to length)";

/// Reads up to `max_bytes` from `path`.
///
/// Returns the text and whether anything was left unread. The check for
/// leftover bytes reads from the same handle, so the prefix is never read twice.
/// A multi-byte character cut by the limit is dropped from the prefix.
pub fn read_prefix(path: &Path, max_bytes: usize) -> std::io::Result<(String, bool)> {
    let mut file = File::open(path)?;
    let mut buf = Vec::with_capacity(max_bytes.min(64 * 1024));
    (&mut file).take(max_bytes as u64).read_to_end(&mut buf)?;

    let mut probe = [0u8; 1];
    let mut truncated = loop {
        match file.read(&mut probe) {
            Ok(n) => break n > 0,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    };

    let text = match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => {
            let utf8 = e.utf8_error();
            // error_len() == None: the buffer ends inside a character.
            if utf8.error_len().is_some() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "file is not valid UTF-8 text",
                ));
            }
            let mut bytes = e.into_bytes();
            bytes.truncate(utf8.valid_up_to());
            truncated = true;
            String::from_utf8(bytes)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
        }
    };
    Ok((text, truncated))
}

/// Resolves `file_path` and reads its prefix, appending [`TRUNCATION_NOTICE`] when cut.
pub fn read_file(
    root: &WorkspaceRoot,
    file_path: &str,
    max_bytes: usize,
) -> Result<String, FileToolError> {
    let resolved = root.resolve(file_path)?;
    if !resolved.path().is_file() {
        return Err(FileToolError::NotFound {
            kind: EntryKind::File,
            path: file_path.to_string(),
        });
    }
    let (mut content, truncated) = read_prefix(resolved.path(), max_bytes)
        .map_err(|e| FileToolError::io("read file", file_path, e))?;
    if truncated {
        content.push_str(TRUNCATION_NOTICE);
    }
    Ok(content)
}

/// Tool that reads a bounded prefix of a file under the workspace root.
#[derive(Debug, Clone)]
pub struct ReadFileTool {
    root: WorkspaceRoot,
    max_bytes: usize,
}

impl ReadFileTool {
    pub fn new(root: WorkspaceRoot, max_bytes: usize) -> Self {
        Self { root, max_bytes }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        TOOL_READ_FILE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_READ_FILE.to_string(),
            description: Some(format!(
                "Reads the content of a specified file. Input should be the relative path to the \
                 file. Output is limited to the first {} bytes.",
                self.max_bytes
            )),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path to the file within the workspace"
                    }
                },
                "required": ["file_path"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        let file_path = required_str(&args, "file_path")?.to_string();
        let root = self.root.clone();
        let max_bytes = self.max_bytes;
        let result = blocking(move || read_file(&root, &file_path, max_bytes)).await?;
        Ok(ToolCallContent::new(super::observe(TOOL_READ_FILE, result)))
    }
}
