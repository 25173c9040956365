//! Tools exposed to the agent: the [`Tool`] trait, the workspace file tools and their registry.

pub mod file;
mod registry;
mod r#trait;

pub use file::{
    EditFileTool, ListDirectoryTool, ReadFileTool, SearchFileContentTool, WriteFileTool,
    TOOL_EDIT_FILE, TOOL_LIST_DIRECTORY, TOOL_READ_FILE, TOOL_SEARCH_FILE_CONTENT,
    TOOL_WRITE_FILE,
};
pub use r#trait::Tool;
pub use registry::{ToolRegistry, WorkspaceTool};
