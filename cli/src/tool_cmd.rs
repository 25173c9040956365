//! Tool subcommand: list tools, show one tool definition, call a tool.
//!
//! Everything goes through the same [`ToolRegistry`] an agent host would build,
//! so `aspen tool call` shows exactly the text the agent would see.
//!
//! Rendering functions return strings; the binary prints them.

use std::path::Path;

use aspen::{ToolRegistry, ToolSettings, ToolSpec};
use serde::Serialize;

use crate::RunError;

/// Maximum length for description in the list table. Longer descriptions are truncated with "...".
const LIST_DESC_MAX_LEN: usize = 60;

/// Output format for `tool show`: YAML (human-readable) or JSON (machine-readable).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolShowFormat {
    #[default]
    Yaml,
    Json,
}

impl ToolShowFormat {
    /// `json` (any case) selects JSON; anything else is YAML.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// Builds the registry from `ASPEN_*` settings, with `workspace` overriding the root.
pub fn build_registry(workspace: Option<&Path>) -> Result<ToolRegistry, RunError> {
    let mut settings = ToolSettings::from_env()?;
    if let Some(dir) = workspace {
        settings.workspace_root = dir.to_path_buf();
    }
    tracing::debug!(root = %settings.workspace_root.display(), "building tool registry");
    Ok(ToolRegistry::from_settings(&settings)?)
}

/// Field order for display; `ToolSpec` itself is the library's type.
#[derive(Serialize)]
struct ToolSpecOutput<'a> {
    name: &'a str,
    description: Option<&'a str>,
    input_schema: &'a serde_json::Value,
}

impl<'a> From<&'a ToolSpec> for ToolSpecOutput<'a> {
    fn from(spec: &'a ToolSpec) -> Self {
        Self {
            name: &spec.name,
            description: spec.description.as_deref(),
            input_schema: &spec.input_schema,
        }
    }
}

fn first_line_truncated(description: Option<&str>) -> String {
    let line = description.unwrap_or("").lines().next().unwrap_or("");
    if line.chars().count() > LIST_DESC_MAX_LEN {
        format!("{}...", line.chars().take(LIST_DESC_MAX_LEN).collect::<String>())
    } else {
        line.to_string()
    }
}

/// `NAME<TAB>DESCRIPTION` table, or a JSON array of full specs when `json` is set.
pub fn list_tools(registry: &ToolRegistry, json: bool) -> Result<String, RunError> {
    let tools = registry.list();
    if json {
        let out: Vec<ToolSpecOutput<'_>> = tools.iter().map(ToolSpecOutput::from).collect();
        return Ok(serde_json::to_string_pretty(&out)?);
    }

    let name_width = tools.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);
    let mut text = format!("{:<width$}\t{}\n", "NAME", "DESCRIPTION", width = name_width);
    for spec in &tools {
        text.push_str(&format!(
            "{:<width$}\t{}\n",
            spec.name,
            first_line_truncated(spec.description.as_deref()),
            width = name_width
        ));
    }
    Ok(text)
}

/// Full spec of one tool.
///
/// Returns [`RunError::ToolNotFound`] if `name` is not a workspace tool.
pub fn show_tool(
    registry: &ToolRegistry,
    name: &str,
    format: ToolShowFormat,
) -> Result<String, RunError> {
    let spec = registry
        .list()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| RunError::ToolNotFound(name.to_string()))?;
    let out = ToolSpecOutput::from(&spec);
    match format {
        ToolShowFormat::Yaml => Ok(serde_yaml::to_string(&out)?),
        ToolShowFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&out)?)),
    }
}

/// Calls `name` with `args` (a JSON object) and returns the observation text.
///
/// Tool failures are part of the text; only unparsable `args` is an error here.
pub async fn call_tool(registry: &ToolRegistry, name: &str, args: &str) -> Result<String, RunError> {
    let args: serde_json::Value =
        serde_json::from_str(args).map_err(RunError::InvalidArgs)?;
    if !args.is_object() {
        return Err(RunError::ArgsNotObject);
    }
    Ok(registry.invoke(name, args).await)
}
