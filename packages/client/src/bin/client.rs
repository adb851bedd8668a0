//! Chat relay participant.
//!
//! Opens an inbound endpoint, joins the hub with the given identity, prints the
//! history and every event pushed afterwards, and sends each line typed at the prompt.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatrelay-client -- --identity alice
//! cargo run --bin chatrelay-client -- -i bob --hub http://127.0.0.1:9000 --listen 127.0.0.1:9101
//! ```

use chatrelay_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatrelay-client")]
#[command(about = "Participant of the chat relay hub", long_about = None)]
struct Args {
    /// Identity shown to other participants
    #[arg(short = 'i', long)]
    identity: String,

    /// Base URL of the hub
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:9000")]
    hub: String,

    /// Address the inbound endpoint binds to
    #[arg(short = 'l', long, default_value = "127.0.0.1:0")]
    listen: String,

    /// Address advertised to the hub instead of the bound one
    #[arg(short = 'a', long)]
    advertise: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) =
        chatrelay_client::run_client(args.hub, args.identity, args.listen, args.advertise).await
    {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
