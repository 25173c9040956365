//! # Aspen
//!
//! Workspace-scoped file tools for ReAct-style agents. An agent runtime picks a
//! tool by name, passes JSON arguments, and gets back text: either the result or
//! an `Error: ...` line it can reason about. Nothing here panics or aborts the
//! agent loop on bad input.
//!
//! ## Tools
//!
//! - `read_file`: file content, cut at the read limit with a truncation notice.
//! - `list_directory`: `[dir]` / `[file]` lines, sorted.
//! - `search_file_content`: regex search through the external `rg` executable.
//! - `write_file`: create or overwrite, creating parent directories.
//! - `edit_file`: apply an elided edit script ([`apply_edit_script`]).
//!
//! Every path argument is resolved under one [`WorkspaceRoot`]; anything that
//! escapes it (`..`, absolute paths, symlinks) is refused.
//!
//! ## Main modules
//!
//! - [`tools`]: [`Tool`] trait, [`WorkspaceTool`], [`ToolRegistry`]; the tools live in [`tools::file`].
//! - [`tool_source`]: [`ToolSource`] seam and [`FileToolSource`], plus [`ToolSpec`] and [`ToolSourceError`].
//! - [`settings`]: [`ToolSettings`] read from `ASPEN_*` environment variables.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use aspen::{FileToolSource, ToolSettings, ToolSource};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ToolSettings::from_env()?;
//! let source = FileToolSource::new(&settings)?;
//! for spec in source.list_tools().await? {
//!     println!("{}", spec.name);
//! }
//! let text = source
//!     .invoke_tool("read_file", json!({"file_path": "Cargo.toml"}))
//!     .await;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod settings;
pub mod tool_source;
pub mod tools;

pub use settings::{SearchSettings, SettingsError, ToolSettings};
pub use tool_source::{FileToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
pub use tools::file::{apply_edit_script, EditScript, FileToolError, WorkspaceRoot};
pub use tools::{Tool, ToolRegistry, WorkspaceTool};
