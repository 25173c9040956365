//! Typed failures of the workspace file tools.
//!
//! Every operation in [`crate::tools::file`] returns [`FileToolError`]; the tool
//! layer renders it as `Error: {display}` before it reaches the agent, so the
//! `Display` text is written for an LLM reader.

use std::fmt;

use thiserror::Error;

/// Kind of filesystem entry a lookup expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("File"),
            EntryKind::Directory => f.write_str("Directory"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FileToolError {
    /// Path resolves outside the workspace root.
    #[error("Access denied. Path is outside the allowed workspace: {path}")]
    AccessDenied { path: String },

    #[error("{kind} not found at {path}")]
    NotFound { kind: EntryKind, path: String },

    /// Double-marker anchor could not be located in the remaining original lines.
    /// `line` is the 1-based edit-script line of the marker.
    #[error(
        "Ambiguous edit. Could not determine how much original code to skip based on marker at edit line {line}. Edit:\n{script}"
    )]
    AmbiguousEdit { line: usize, script: String },

    #[error("'{program}' (ripgrep) command not found. Please ensure ripgrep is installed and in your PATH.")]
    ExternalToolUnavailable { program: String },

    /// Search process exited with something other than 0 (matches) or 1 (no matches).
    #[error("running grep (ripgrep) failed{}: {stderr}", exit_suffix(.code))]
    SearchFailed { code: Option<i32>, stderr: String },

    #[error("grep (ripgrep) did not finish within {secs}s")]
    SearchTimedOut { secs: u64 },

    #[error("could not {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" (exit code {})", c),
        None => " (terminated by signal)".to_string(),
    }
}

impl FileToolError {
    pub(crate) fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        FileToolError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Observation text handed back to the agent.
    pub fn to_observation(&self) -> String {
        format!("Error: {}", self)
    }
}
