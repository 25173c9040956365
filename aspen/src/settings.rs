//! Runtime settings for the file tools, read from the process environment.
//!
//! Call `config::load_and_apply("aspen", None)` first if `.env` / XDG values
//! should be visible here.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::tools::file::DEFAULT_READ_LIMIT;

pub const ENV_WORKSPACE_ROOT: &str = "ASPEN_WORKSPACE_ROOT";
pub const ENV_READ_LIMIT: &str = "ASPEN_READ_LIMIT";
pub const ENV_SEARCH_MAX_MATCHES: &str = "ASPEN_SEARCH_MAX_MATCHES";
pub const ENV_SEARCH_TIMEOUT_SECS: &str = "ASPEN_SEARCH_TIMEOUT_SECS";
pub const ENV_RG_PATH: &str = "ASPEN_RG_PATH";

pub const DEFAULT_SEARCH_MAX_MATCHES: usize = 50;
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("could not determine current directory: {0}")]
    CurrentDir(std::io::Error),
}

/// How `search_file_content` runs ripgrep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Executable name or path.
    pub program: String,
    /// Per-file `--max-count` and the cap on returned lines.
    pub max_matches: usize,
    pub timeout: Duration,
    /// Directories never searched.
    pub excluded_globs: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            program: "rg".to_string(),
            max_matches: DEFAULT_SEARCH_MAX_MATCHES,
            timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            excluded_globs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                ".venv".to_string(),
            ],
        }
    }
}

/// Everything needed to build the tool set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Not yet canonicalized; [`WorkspaceRoot::new`](crate::WorkspaceRoot::new) does that.
    pub workspace_root: PathBuf,
    pub read_limit: usize,
    pub search: SearchSettings,
}

impl ToolSettings {
    /// Defaults rooted at `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            read_limit: DEFAULT_READ_LIMIT,
            search: SearchSettings::default(),
        }
    }

    /// Reads `ASPEN_*` variables; unset ones fall back to defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let workspace_root = match non_empty(lookup(ENV_WORKSPACE_ROOT)) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().map_err(SettingsError::CurrentDir)?,
        };
        let mut settings = Self::new(workspace_root);
        if let Some(v) = non_empty(lookup(ENV_READ_LIMIT)) {
            settings.read_limit = parse_positive(ENV_READ_LIMIT, &v)? as usize;
        }
        if let Some(v) = non_empty(lookup(ENV_SEARCH_MAX_MATCHES)) {
            settings.search.max_matches = parse_positive(ENV_SEARCH_MAX_MATCHES, &v)? as usize;
        }
        if let Some(v) = non_empty(lookup(ENV_SEARCH_TIMEOUT_SECS)) {
            settings.search.timeout =
                Duration::from_secs(parse_positive(ENV_SEARCH_TIMEOUT_SECS, &v)?);
        }
        if let Some(program) = non_empty(lookup(ENV_RG_PATH)) {
            settings.search.program = program;
        }
        Ok(settings)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, SettingsError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SettingsError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}
