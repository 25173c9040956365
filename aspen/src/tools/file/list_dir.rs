//! List-directory tool: list immediate children of a directory under the workspace root.
//!
//! Exposes `list_directory` as a tool for the LLM. Entries are sorted by name
//! and tagged `[dir]` or `[file]`.

use async_trait::async_trait;
use serde_json::json;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

use super::error::{EntryKind, FileToolError};
use super::path::WorkspaceRoot;
use super::{blocking, optional_str};

/// Tool name for listing directory entries.
pub const TOOL_LIST_DIRECTORY: &str = "list_directory";

/// Returned instead of an empty listing.
pub const EMPTY_DIRECTORY: &str = "Directory is empty.";

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntryInfo {
    fn render(&self) -> String {
        let tag = if self.is_dir { "[dir]" } else { "[file]" };
        format!("{} {}", tag, self.name)
    }
}

/// Lists the children of `dir_path`, sorted by name.
///
/// Symlinks are tagged by what they point to.
pub fn list_entries(
    root: &WorkspaceRoot,
    dir_path: &str,
) -> Result<Vec<DirEntryInfo>, FileToolError> {
    let dir = root.resolve(dir_path)?;
    if !dir.path().is_dir() {
        return Err(FileToolError::NotFound {
            kind: EntryKind::Directory,
            path: dir_path.to_string(),
        });
    }
    let read_dir = std::fs::read_dir(dir.path())
        .map_err(|e| FileToolError::io("list directory", dir_path, e))?;
    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| FileToolError::io("list directory", dir_path, e))?;
        entries.push(DirEntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.path().is_dir(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Renders a listing as the agent sees it.
pub fn render_entries(entries: &[DirEntryInfo]) -> String {
    if entries.is_empty() {
        return EMPTY_DIRECTORY.to_string();
    }
    entries
        .iter()
        .map(DirEntryInfo::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tool that lists files and subdirectories in one directory.
#[derive(Debug, Clone)]
pub struct ListDirectoryTool {
    root: WorkspaceRoot,
}

impl ListDirectoryTool {
    pub fn new(root: WorkspaceRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        TOOL_LIST_DIRECTORY
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_LIST_DIRECTORY.to_string(),
            description: Some(
                "Lists the contents (files and directories) of a specified directory. Input is \
                 the relative path to the directory."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "dir_path": {
                        "type": "string",
                        "description": "Relative path to the directory within the workspace",
                        "default": "."
                    }
                }
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        let dir_path = optional_str(&args, "dir_path")?.unwrap_or(".").to_string();
        let root = self.root.clone();
        let result = blocking(move || {
            list_entries(&root, &dir_path).map(|entries| render_entries(&entries))
        })
        .await?;
        Ok(ToolCallContent::new(super::observe(
            TOOL_LIST_DIRECTORY,
            result,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_renders_fixed_message() {
        let dir = tempfile::tempdir().unwrap();
        let root = WorkspaceRoot::new(dir.path()).unwrap();
        let entries = list_entries(&root, ".").unwrap();
        assert!(entries.is_empty());
        assert_eq!(render_entries(&entries), EMPTY_DIRECTORY);
    }

    #[test]
    fn entries_are_sorted_and_tagged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("a_dir")).unwrap();
        std::fs::write(dir.path().join("c.rs"), "").unwrap();
        let root = WorkspaceRoot::new(dir.path()).unwrap();

        let text = render_entries(&list_entries(&root, "").unwrap());
        assert_eq!(text, "[dir] a_dir\n[file] b.txt\n[file] c.rs");
    }

    #[test]
    fn file_target_is_directory_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "").unwrap();
        let root = WorkspaceRoot::new(dir.path()).unwrap();
        let err = list_entries(&root, "f.txt").unwrap_err();
        assert_eq!(err.to_string(), "Directory not found at f.txt");
    }
}
