//! Tool registry: the fixed set of workspace tools and name-based dispatch.

use async_trait::async_trait;

use crate::settings::ToolSettings;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::file::{
    EditFileTool, ListDirectoryTool, ReadFileTool, SearchFileContentTool, WorkspaceRoot,
    WriteFileTool,
};
use crate::tools::r#trait::Tool;

/// The closed set of workspace tools.
///
/// Dispatch is a match over variants; there is no runtime registration.
#[derive(Debug, Clone)]
pub enum WorkspaceTool {
    ReadFile(ReadFileTool),
    ListDirectory(ListDirectoryTool),
    SearchFileContent(SearchFileContentTool),
    WriteFile(WriteFileTool),
    EditFile(EditFileTool),
}

impl WorkspaceTool {
    fn as_tool(&self) -> &dyn Tool {
        match self {
            Self::ReadFile(t) => t,
            Self::ListDirectory(t) => t,
            Self::SearchFileContent(t) => t,
            Self::WriteFile(t) => t,
            Self::EditFile(t) => t,
        }
    }
}

#[async_trait]
impl Tool for WorkspaceTool {
    fn name(&self) -> &str {
        self.as_tool().name()
    }

    fn spec(&self) -> ToolSpec {
        self.as_tool().spec()
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        self.as_tool().call(args).await
    }
}

/// The five workspace tools over one root, in listing order.
///
/// # Examples
///
/// ```no_run
/// use aspen::{ToolRegistry, ToolSettings};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), aspen::ToolSourceError> {
/// let registry = ToolRegistry::from_settings(&ToolSettings::new("/tmp/ws"))?;
/// let text = registry.invoke("list_directory", json!({})).await;
/// println!("{}", text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    root: WorkspaceRoot,
    tools: Vec<WorkspaceTool>,
}

impl ToolRegistry {
    /// Builds all tools from settings. Fails if the workspace root is not an existing directory.
    pub fn from_settings(settings: &ToolSettings) -> Result<Self, ToolSourceError> {
        let root = WorkspaceRoot::new(&settings.workspace_root)?;
        Ok(Self::with_root(root, settings))
    }

    /// Builds all tools over an already resolved root; path and read/search limits come from `settings`.
    pub fn with_root(root: WorkspaceRoot, settings: &ToolSettings) -> Self {
        let tools = vec![
            WorkspaceTool::ReadFile(ReadFileTool::new(root.clone(), settings.read_limit)),
            WorkspaceTool::ListDirectory(ListDirectoryTool::new(root.clone())),
            WorkspaceTool::SearchFileContent(SearchFileContentTool::new(
                root.clone(),
                settings.search.clone(),
            )),
            WorkspaceTool::WriteFile(WriteFileTool::new(root.clone())),
            WorkspaceTool::EditFile(EditFileTool::new(root.clone())),
        ];
        tracing::debug!(root = %root.path().display(), tools = tools.len(), "tool registry built");
        Self { root, tools }
    }

    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }

    pub fn get(&self, name: &str) -> Option<&WorkspaceTool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Specs of all tools, in listing order.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Calls a tool by name.
    ///
    /// # Errors
    ///
    /// [`ToolSourceError::NotFound`] for an unknown name; otherwise whatever the tool returns.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tracing::debug!(tool = %name, "tool call");
        tool.call(args).await
    }

    /// Calls a tool and returns its text; every failure becomes `Error: ...`.
    pub async fn invoke(&self, name: &str, args: serde_json::Value) -> String {
        match self.call(name, args).await {
            Ok(content) => content.text,
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "tool call rejected");
                format!("Error: {}", e)
            }
        }
    }

    /// Synchronous [`invoke`](Self::invoke) for callers without a runtime.
    ///
    /// Runs on a separate thread with its own current-thread runtime, so it is
    /// also safe to call from inside an async context.
    pub fn invoke_blocking(&self, name: &str, args: serde_json::Value) -> String {
        std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let rt = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                        .map_err(|e| format!("Error: could not start runtime: {}", e))?;
                    Ok::<_, String>(rt.block_on(self.invoke(name, args)))
                })
                .join()
                .unwrap_or_else(|_| Err(format!("Error: tool {} panicked", name)))
                .unwrap_or_else(|text| text)
        })
    }
}
