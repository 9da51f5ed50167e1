use clap::Parser;
use systemprompt_mcp::cli::{run_cli, Args};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries JSON output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run_cli(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
