//! Aspen CLI library: tool listing, inspection and invocation for the `aspen` binary.
//!
//! Builds a [`ToolRegistry`](aspen::ToolRegistry) from `ASPEN_*` settings (after
//! `.env` / XDG config has been applied) and renders results as text.

pub mod tool_cmd;

use thiserror::Error;

pub use tool_cmd::{build_registry, call_tool, list_tools, show_tool, ToolShowFormat};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("settings: {0}")]
    Settings(#[from] aspen::SettingsError),
    #[error("{0}")]
    Source(#[from] aspen::ToolSourceError),
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    #[error("--args is not valid JSON: {0}")]
    InvalidArgs(serde_json::Error),
    #[error("--args must be a JSON object")]
    ArgsNotObject,
    #[error("render json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("render yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
