pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod mcp;

pub use client::ApiClient;
pub use error::{Error, Result};

/// Version of systemprompt-mcp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
