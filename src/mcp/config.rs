use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a caller describes a server before it is turned into a launch descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ServerConfig {
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetadata {
    pub icon: String,
    pub color: String,
    pub description: String,
    pub server_type: String,
}

/// Launch-ready server entry.
///
/// `env` and `metadata` are optional because the remote API may hand back bare
/// `{command, args}` entries; whatever else the server sends is kept in
/// `extra` so that a fetched document serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ServerMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The document exchanged with `/v1/mcp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformedMcpData {
    #[serde(default, rename = "mcpServers")]
    pub mcp_servers: IndexMap<String, LaunchDescriptor>,
    #[serde(default)]
    pub available: IndexMap<String, bool>,
    #[serde(default)]
    pub defaults: IndexMap<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
