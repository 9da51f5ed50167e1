use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::RequestMode;

#[derive(Parser, Debug)]
#[command(name = "systemprompt-mcp")]
#[command(version, about = "Fetch and update MCP server configuration", long_about = None)]
pub struct Args {
    /// API base URL
    #[arg(long, global = true, env = "SYSTEMPROMPT_API_URL")]
    pub base_url: Option<String>,

    /// API key sent in the `api-key` header (`transform` reads only the environment)
    #[arg(long, global = true, env = "SYSTEMPROMPT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file (default: <config dir>/systemprompt-mcp/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Package runner used for transformed servers
    #[arg(long, global = true)]
    pub launcher: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current MCP configuration
    Fetch,

    /// Upload an MCP configuration document
    Update {
        /// JSON file holding the document
        file: PathBuf,
    },

    /// Send a raw request to the API
    Request {
        /// Path resolved against the base URL
        path: String,

        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Extra header, as `Name: value` (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Request body
        #[arg(short, long)]
        data: Option<String>,

        /// Fetch request mode (cors, no-cors, same-origin, navigate)
        #[arg(long)]
        mode: Option<RequestMode>,
    },

    /// Turn server configs into launch descriptors (no network)
    Transform {
        /// JSON file with `{name: {command, args}}` or an `mcpServers` object
        file: PathBuf,
    },

    /// Show version
    Version,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{s}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
