pub mod config;
pub mod launcher;
pub mod transform;

pub use config::{LaunchDescriptor, ServerConfig, ServerMetadata, TransformedMcpData};
pub use launcher::Launcher;
pub use transform::{transform_servers, Environment, ProcessEnv, API_KEY_ENV};
