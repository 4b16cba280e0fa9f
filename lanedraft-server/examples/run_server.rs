//! Example to run the LANEDRAFT server standalone
//!
//! Run with: cargo run -p lanedraft-server --example run_server

use lanedraft_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    println!("Starting LANEDRAFT server on port {}", config.port);
    println!("POST rosters to http://localhost:{}/api/match", config.port);

    run_server(config).await
}
