//! File tools: read_file, list_directory, search_file_content, write_file, edit_file.
//!
//! All tools share one [`WorkspaceRoot`]; every path argument is resolved under it
//! before any I/O. Each module exposes the operation as a plain function returning
//! [`FileToolError`] plus a [`Tool`](crate::tools::Tool) wrapper that renders the
//! result as text.

mod edit_file;
mod edit_script;
mod error;
mod grep;
mod list_dir;
mod path;
mod read_file;
mod write_file;

pub use edit_file::{edit_file, EditFileTool, TOOL_EDIT_FILE};
pub use edit_script::{
    apply_edit_script, is_marker_line, split_lines_keep_ends, EditLine, EditScript,
};
pub use error::{EntryKind, FileToolError};
pub use grep::{
    interpret_output, ProcessOutput, RipgrepSearcher, SearchFileContentTool, FOUND_BUT_EMPTY,
    PATTERN_NOT_FOUND, TOOL_SEARCH_FILE_CONTENT,
};
pub use list_dir::{
    list_entries, render_entries, DirEntryInfo, ListDirectoryTool, EMPTY_DIRECTORY,
    TOOL_LIST_DIRECTORY,
};
pub use path::{ResolvedPath, WorkspaceRoot};
pub use read_file::{
    read_file, read_prefix, ReadFileTool, DEFAULT_READ_LIMIT, TOOL_READ_FILE, TRUNCATION_NOTICE,
};
pub use write_file::{write_file, WriteFileTool, TOOL_WRITE_FILE};

use crate::tool_source::ToolSourceError;

/// Required string argument.
pub(crate) fn required_str<'a>(
    args: &'a serde_json::Value,
    key: &str,
) -> Result<&'a str, ToolSourceError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolSourceError::InvalidInput(format!("missing {}", key)))
}

/// Optional string argument; present but not a string is an error.
pub(crate) fn optional_str<'a>(
    args: &'a serde_json::Value,
    key: &str,
) -> Result<Option<&'a str>, ToolSourceError> {
    match args.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| ToolSourceError::InvalidInput(format!("{} must be a string", key))),
    }
}

/// Runs blocking filesystem work off the async worker.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ToolSourceError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ToolSourceError::Transport(format!("file tool task failed: {}", e)))
}

/// Renders an operation result for the agent, logging failures.
pub(crate) fn observe(tool: &str, result: Result<String, FileToolError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(tool = %tool, error = %e, "file tool failed");
            e.to_observation()
        }
    }
}
