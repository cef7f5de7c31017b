//! Family chat room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin carechat-server
//! cargo run --bin carechat-server -- --host 0.0.0.0 --port 3000 --join-ticket-ttl-secs 60
//! ```

use std::sync::Arc;

use carechat_server::{
    config::{Args, ServerConfig},
    ui::{AppState, Server},
};
use carechat_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from(Args::parse());

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);
    tracing::debug!("Starting with {:?}", config);

    // Repositories, MessagePusher and UseCases on in-memory stores
    let state = AppState::in_memory(Arc::new(SystemClock), config.join_ticket_ttl);

    let server = Server::new(state);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
