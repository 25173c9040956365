//! Aspen CLI binary: inspect and call the workspace file tools from the command line.
//!
//! Subcommands: `tool list`, `tool show <NAME>`, `tool call <NAME> --args <JSON>`.

mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{build_registry, call_tool, list_tools, show_tool, RunError, ToolShowFormat};

#[derive(Parser, Debug)]
#[command(name = "aspen")]
#[command(about = "Aspen — workspace file tools for agents (read, list, search, write, edit)")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Workspace root for all tools (default: ASPEN_WORKSPACE_ROOT or current directory)
    #[arg(short, long, value_name = "DIR", global = true)]
    workspace: Option<PathBuf>,

    /// Output JSON (array for tool list; spec for tool show)
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List, show or call the workspace tools
    Tool(ToolArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ToolArgs {
    #[command(subcommand)]
    sub: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// List all tools (name and description)
    List,
    /// Show full definition of one tool (name, description, input_schema)
    Show(ShowToolArgs),
    /// Call one tool and print the text the agent would see
    Call(CallToolArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ShowToolArgs {
    /// Tool name (e.g. read_file, edit_file)
    name: String,
    /// Output format: yaml (default) or json
    #[arg(long, value_name = "FORMAT", default_value = "yaml")]
    output: String,
}

#[derive(clap::Args, Debug, Clone)]
struct CallToolArgs {
    /// Tool name
    name: String,
    /// Tool arguments as a JSON object
    #[arg(long, value_name = "JSON", default_value = "{}")]
    args: String,
}

async fn run(args: Args) -> Result<String, RunError> {
    let registry = build_registry(args.workspace.as_deref())?;
    let Command::Tool(ta) = args.cmd;
    match ta.sub {
        ToolCommand::List => list_tools(&registry, args.json),
        ToolCommand::Show(show) => {
            let format = if args.json {
                ToolShowFormat::Json
            } else {
                ToolShowFormat::parse(&show.output)
            };
            show_tool(&registry, &show.name, format)
        }
        ToolCommand::Call(call) => {
            let mut text = call_tool(&registry, &call.name, &call.args).await?;
            if !text.ends_with('\n') {
                text.push('\n');
            }
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let report = match config::load_and_apply("aspen", None) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("aspen: config: {}", e);
            std::process::exit(1);
        }
    };
    logging::init()?;
    tracing::debug!(
        xdg = ?report.sources.xdg_file,
        dotenv = ?report.sources.dotenv_file,
        applied = ?report.applied,
        "config loaded"
    );

    let args = Args::parse();
    match run(args).await {
        Ok(text) => {
            print!("{}", text);
            std::io::Write::flush(&mut std::io::stdout())?;
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("aspen: {}", e);
            std::process::exit(1);
        }
    }
}
