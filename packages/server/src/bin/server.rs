//! Chat relay hub.
//!
//! Keeps the message log and the participant registry, and pushes every accepted
//! event to all connected participants through their receive endpoints.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatrelay-server
//! cargo run --bin chatrelay-server -- --host 0.0.0.0 --port 9000 --queue-capacity 1024
//! ```

use std::{sync::Arc, time::Duration};

use chatrelay_server::{
    config::HubConfig, hub::Hub, infrastructure::HttpDeliveryConnector, ui::Server,
};
use chatrelay_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatrelay-server")]
#[command(about = "Centralized chat relay hub", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "9000")]
    port: u16,

    /// Maximum number of events waiting for fan-out
    #[arg(long, default_value = "256")]
    queue_capacity: usize,

    /// Per-recipient delivery timeout in milliseconds
    #[arg(long, default_value = "5000")]
    delivery_timeout_ms: u64,

    /// Timeout for reaching a joining participant's endpoint in milliseconds
    #[arg(long, default_value = "3000")]
    connect_timeout_ms: u64,
}

impl Args {
    fn hub_config(&self) -> HubConfig {
        HubConfig {
            queue_capacity: self.queue_capacity,
            delivery_timeout: Duration::from_millis(self.delivery_timeout_ms),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = args.hub_config();
    tracing::debug!("Hub configuration: {:?}", config);

    // 1. Delivery connector (HTTP implementation)
    let connector = Arc::new(HttpDeliveryConnector::new(config.connect_timeout));

    // 2. Hub core and broadcast engine
    let (hub, _engine) = Hub::start(&config, connector, Arc::new(SystemClock));

    // 3. HTTP front
    let server = Server::new(hub);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
