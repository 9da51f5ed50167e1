use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{Args, Command};
use crate::client::{ApiClient, RequestMode, RequestOptions};
use crate::config::{ConfigFile, Overrides, Settings};
use crate::mcp::{self, Launcher, ProcessEnv, ServerConfig, TransformedMcpData};

pub async fn run_cli(args: Args) -> Result<()> {
    let Args {
        base_url,
        api_key,
        config,
        launcher,
        command,
    } = args;

    let file = match config {
        Some(path) => ConfigFile::load_from(&path)
            .await?
            .with_context(|| format!("config file not found: {}", path.display()))
            .map(Some)?,
        // No config dir at all is fine; a broken file in it is not.
        None => match ConfigFile::default_path() {
            Ok(path) => ConfigFile::load_from(&path).await?,
            Err(e) => {
                tracing::warn!("skipping default config file: {e}");
                None
            }
        },
    };
    let overrides = Overrides {
        base_url,
        api_key,
        launcher,
    };

    match command {
        Command::Fetch => {
            let client = client(overrides, file)?;
            let data = client.fetch_config().await?;
            print_json(&data)
        }

        Command::Update { file: input } => {
            let client = client(overrides, file)?;
            let data: TransformedMcpData = read_json(&input).await?;
            let resp = client.update_config(&data).await?;
            print_json(&resp)
        }

        Command::Request {
            path,
            method,
            headers,
            data,
            mode,
        } => {
            let client = client(overrides, file)?;
            let options = request_options(&method, headers, data, mode)?;
            let resp: Value = client.request(&path, options).await?;
            print_json(&resp)
        }

        Command::Transform { file: input } => {
            let launcher = overrides
                .launcher
                .or_else(|| file.and_then(|f| f.launcher))
                .map(Launcher::new)
                .unwrap_or_else(Launcher::detect);
            let servers = read_servers(&input).await?;
            let descriptors = mcp::transform_servers(&servers, &launcher, &ProcessEnv);
            print_json(&descriptors)
        }

        Command::Version => {
            println!("systemprompt-mcp v{}", crate::VERSION);
            Ok(())
        }
    }
}

fn client(overrides: Overrides, file: Option<ConfigFile>) -> Result<ApiClient> {
    let settings = Settings::resolve(overrides, file)?;
    Ok(ApiClient::new(settings.base_url, settings.api_key).with_launcher(settings.launcher))
}

fn request_options(
    method: &str,
    headers: Vec<(String, String)>,
    data: Option<String>,
    mode: Option<RequestMode>,
) -> Result<RequestOptions> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method: {method}"))?;

    let mut options = RequestOptions::new().method(method);
    for (name, value) in headers {
        options = options.header(name, value);
    }
    options.body = data;
    options.mode = mode;
    Ok(options)
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Accepts either a bare `{name: ServerConfig}` map or a document wrapping it
/// in `mcpServers`.
async fn read_servers(path: &Path) -> Result<IndexMap<String, ServerConfig>> {
    let mut doc: Value = read_json(path).await?;
    if let Some(inner) = doc.get_mut("mcpServers") {
        doc = inner.take();
    }
    serde_json::from_value(doc)
        .with_context(|| format!("{} does not hold server configs", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
