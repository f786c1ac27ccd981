#![cfg(not(tarpaulin_include))]

use notes_viewer::app;
use notes_viewer::config::ServerConfig;

/// Main entry point for the notes viewer web application
///
/// Initializes logging (`RUST_LOG`, default `info`), resolves the server
/// configuration from the command line and environment, and serves until the
/// process is stopped.
///
/// # Arguments
/// * Optional first positional argument: address to bind, e.g. `0.0.0.0:8080`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    log::info!(
        "Starting notes viewer on {} (upload limit {} bytes)",
        config.addr,
        config.max_upload_bytes
    );

    app::run(config).await
}
