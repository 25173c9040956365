//! Search tool: regex search of file contents via the external `rg` (ripgrep) executable.
//!
//! Exposes `search_file_content` as a tool with parameters `pattern` and `path`.
//! The process boundary is explicit: the executable is located with [`which`]
//! before spawning, stdout/stderr/exit code are captured into [`ProcessOutput`],
//! and [`interpret_output`] maps them to a result. The run is bounded by the
//! configured timeout.
//!
//! Exit codes follow ripgrep: 0 = matches, 1 = no matches, anything else = error.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::json;
use tokio::process::Command;

use crate::settings::SearchSettings;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

use super::error::FileToolError;
use super::path::WorkspaceRoot;
use super::{optional_str, required_str};

/// Tool name for content search.
pub const TOOL_SEARCH_FILE_CONTENT: &str = "search_file_content";

pub const PATTERN_NOT_FOUND: &str = "Pattern not found.";

/// Exit code 0 with nothing on stdout.
pub const FOUND_BUT_EMPTY: &str =
    "Pattern found, but no specific lines matched (or rg configuration hides them).";

/// Captured result of one search process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for ProcessOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Maps a finished search process to the text the agent sees.
///
/// Output longer than `max_matches` lines is cut with a notice; ripgrep's own
/// `--max-count` only bounds matches per file.
pub fn interpret_output(output: ProcessOutput, max_matches: usize) -> Result<String, FileToolError> {
    match output.code {
        Some(0) => {
            if output.stdout.is_empty() {
                return Ok(FOUND_BUT_EMPTY.to_string());
            }
            let total = output.stdout.lines().count();
            if total <= max_matches {
                return Ok(output.stdout);
            }
            let mut text = output
                .stdout
                .lines()
                .take(max_matches)
                .collect::<Vec<_>>()
                .join("\n");
            text.push_str(&format!(
                "\n... (showing first {} of {} matches)",
                max_matches, total
            ));
            Ok(text)
        }
        Some(1) => Ok(PATTERN_NOT_FOUND.to_string()),
        code => Err(FileToolError::SearchFailed {
            code,
            stderr: output.stderr.trim_end().to_string(),
        }),
    }
}

/// Runs ripgrep scoped to a path under the workspace root.
#[derive(Debug, Clone)]
pub struct RipgrepSearcher {
    root: WorkspaceRoot,
    settings: SearchSettings,
}

impl RipgrepSearcher {
    pub fn new(root: WorkspaceRoot, settings: SearchSettings) -> Self {
        Self { root, settings }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Finds the configured executable on `PATH` (or at the given path).
    pub fn locate(&self) -> Result<PathBuf, FileToolError> {
        which::which(&self.settings.program).map_err(|e| {
            tracing::warn!(program = %self.settings.program, error = %e, "search executable not found");
            FileToolError::ExternalToolUnavailable {
                program: self.settings.program.clone(),
            }
        })
    }

    /// Arguments for one run; `target` is relative to the workspace root.
    pub fn build_args(&self, pattern: &str, target: PathBuf) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            format!("--max-count={}", self.settings.max_matches).into(),
            "--line-number".into(),
            "--color=never".into(),
        ];
        for glob in &self.settings.excluded_globs {
            args.push(format!("--glob=!{}", glob).into());
        }
        args.push("-e".into());
        args.push(pattern.into());
        args.push(target.into_os_string());
        args
    }

    /// Searches `path` (relative to the root) for `pattern`.
    pub async fn search(&self, pattern: &str, path: &str) -> Result<String, FileToolError> {
        let resolved = self.root.resolve(path)?;
        let program = self.locate()?;
        let target = self.root.relative(resolved.path());
        let args = self.build_args(pattern, target);
        tracing::debug!(program = %program.display(), ?args, "spawning search");

        let child = Command::new(&program)
            .args(&args)
            .current_dir(self.root.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => FileToolError::ExternalToolUnavailable {
                    program: self.settings.program.clone(),
                },
                _ => FileToolError::io("run search in", path, e),
            })?;

        let output = tokio::time::timeout(self.settings.timeout, child.wait_with_output())
            .await
            .map_err(|_| FileToolError::SearchTimedOut {
                secs: self.settings.timeout.as_secs(),
            })?
            .map_err(|e| FileToolError::io("run search in", path, e))?;

        interpret_output(output.into(), self.settings.max_matches)
    }
}

/// Tool that searches file contents under the workspace root with ripgrep.
#[derive(Debug, Clone)]
pub struct SearchFileContentTool {
    searcher: RipgrepSearcher,
}

impl SearchFileContentTool {
    pub fn new(root: WorkspaceRoot, settings: SearchSettings) -> Self {
        Self {
            searcher: RipgrepSearcher::new(root, settings),
        }
    }
}

#[async_trait]
impl Tool for SearchFileContentTool {
    fn name(&self) -> &str {
        TOOL_SEARCH_FILE_CONTENT
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_SEARCH_FILE_CONTENT.to_string(),
            description: Some(format!(
                "Searches for a specific regex pattern within a file or directory using ripgrep \
                 (rg). Input requires 'pattern' (regex) and optionally 'path' (relative path, \
                 default is current directory '.'). Remember to escape regex special characters \
                 in the pattern if needed. At most {} matching lines are returned.",
                self.searcher.settings().max_matches
            )),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "description": "The regex pattern to search for"
                    },
                    "path": {
                        "type": "string",
                        "description": "Relative path to the file or directory to search within",
                        "default": "."
                    }
                },
                "required": ["pattern"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        let pattern = required_str(&args, "pattern")?;
        if pattern.is_empty() {
            return Err(ToolSourceError::InvalidInput(
                "pattern must be non-empty".to_string(),
            ));
        }
        let path = optional_str(&args, "path")?.unwrap_or(".");
        let result = self.searcher.search(pattern, path).await;
        Ok(ToolCallContent::new(super::observe(
            TOOL_SEARCH_FILE_CONTENT,
            result,
        )))
    }
}
