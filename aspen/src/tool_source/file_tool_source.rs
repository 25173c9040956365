//! File tool source: the five workspace file tools behind [`ToolSource`].
//!
//! Exposes read_file, list_directory, search_file_content, write_file and
//! edit_file. All paths are validated to stay under the workspace root.
//! Uses [`ToolRegistry`](crate::tools::ToolRegistry) internally.

use async_trait::async_trait;
use serde_json::Value;

use crate::settings::ToolSettings;
use crate::tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
use crate::tools::file::WorkspaceRoot;
use crate::tools::ToolRegistry;

/// Tool source that exposes file operations under a fixed workspace root.
///
/// The root is canonicalized at construction; it must exist and be a directory.
pub struct FileToolSource {
    registry: ToolRegistry,
}

impl FileToolSource {
    /// Creates the source from settings.
    ///
    /// # Errors
    ///
    /// - [`ToolSourceError::InvalidInput`] if the workspace root does not exist,
    ///   is not a directory, or canonicalization fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aspen::tool_source::FileToolSource;
    /// use aspen::ToolSettings;
    /// # fn main() -> Result<(), aspen::tool_source::ToolSourceError> {
    /// let source = FileToolSource::new(&ToolSettings::new("/tmp/my_workspace"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(settings: &ToolSettings) -> Result<Self, ToolSourceError> {
        Ok(Self {
            registry: ToolRegistry::from_settings(settings)?,
        })
    }

    pub fn root(&self) -> &WorkspaceRoot {
        self.registry.root()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

#[async_trait]
impl ToolSource for FileToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.registry.list())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        self.registry.call(name, arguments).await
    }
}
