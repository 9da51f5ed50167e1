use std::collections::HashMap;

use indexmap::IndexMap;

use crate::mcp::{LaunchDescriptor, Launcher, ServerConfig, ServerMetadata};

/// Variable forwarded to every launched server.
pub const API_KEY_ENV: &str = "SYSTEMPROMPT_API_KEY";

const ICON: &str = "solar:programming-line-duotone";
const COLOR: &str = "secondary";
const SERVER_TYPE: &str = "core";

/// Source of environment variables for the transform.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment at lookup time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Turns caller server configs into launch descriptors.
///
/// The caller's `command` and `args` are not used: each server is started as
/// `<launcher> -y <name>`. Output order follows input order.
pub fn transform_servers<E>(
    servers: &IndexMap<String, ServerConfig>,
    launcher: &Launcher,
    env: &E,
) -> IndexMap<String, LaunchDescriptor>
where
    E: Environment + ?Sized,
{
    let api_key = env.var(API_KEY_ENV).unwrap_or_default();

    servers
        .keys()
        .map(|name| {
            let descriptor = LaunchDescriptor {
                command: launcher.path().to_string(),
                args: vec!["-y".to_string(), name.clone()],
                env: Some(IndexMap::from([(API_KEY_ENV.to_string(), api_key.clone())])),
                metadata: Some(ServerMetadata {
                    icon: ICON.to_string(),
                    color: COLOR.to_string(),
                    description: format!("{name} MCP server"),
                    server_type: SERVER_TYPE.to_string(),
                }),
                extra: Default::default(),
            };
            (name.clone(), descriptor)
        })
        .collect()
}
