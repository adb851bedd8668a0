//! Client execution logic.

use chatrelay_shared::protocol::ChatEventDto;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    error::ClientError, formatter::MessageFormatter, hub_client::HubClient,
    inbound::InboundEndpoint,
    ui::{InputCommand, parse_input, redisplay_prompt},
};

/// Run a participant session until the user exits
///
/// # Arguments
///
/// * `hub_url` - Base URL of the hub (e.g., "http://127.0.0.1:9000")
/// * `identity` - Identity to join with
/// * `listen_addr` - Address the inbound endpoint binds to (e.g., "127.0.0.1:0")
/// * `advertise` - Address sent to the hub instead of the bound address, for
///   wildcard binds or NAT
///
/// # Errors
///
/// Returns an error if the inbound endpoint cannot be bound or the join fails.
/// Failed sends are logged and the session continues.
pub async fn run_client(
    hub_url: String,
    identity: String,
    listen_addr: String,
    advertise: Option<String>,
) -> Result<(), ClientError> {
    // 1. Inbound endpoint
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<ChatEventDto>();
    let inbound = InboundEndpoint::spawn(&listen_addr, events_tx).await?;
    let endpoint_address = advertise.unwrap_or_else(|| inbound.local_addr().to_string());

    // 2. Join
    let hub = HubClient::new(hub_url);
    tracing::info!(
        "Joining {} as '{}' (endpoint {})",
        hub.base_url(),
        identity,
        endpoint_address
    );
    let history = hub.join(&identity, &endpoint_address).await?;
    print!("{}", MessageFormatter::format_history(&history, &identity));
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Type /quit or press Ctrl+D to exit.\n",
        identity
    );

    // 3. Print events pushed by the hub
    let identity_for_print = identity.clone();
    let mut print_task = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            print!("{}", MessageFormatter::format_incoming(&event));
            redisplay_prompt(&identity_for_print);
        }
    });

    // 4. Read console input on a blocking thread (rustyline is synchronous)
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", identity);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => match parse_input(&line) {
                    Some(InputCommand::Quit) => {
                        println!("exiting...");
                        break;
                    }
                    Some(InputCommand::Message(text)) => {
                        rl.add_history_entry(text.as_str()).ok();
                        if input_tx.send(text).is_err() {
                            break;
                        }
                    }
                    None => {}
                },
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // 5. Send input lines to the hub
    let mut send_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            match hub.send(&identity, &line).await {
                Ok(true) => tracing::debug!("Message accepted by hub"),
                Ok(false) => tracing::warn!("Hub did not accept the message"),
                Err(e) => tracing::warn!("Failed to send message: {}", e),
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            print_task.abort();
        }
        _ = &mut print_task => {
            send_task.abort();
        }
    }

    drop(inbound);
    tracing::info!("Session ended");
    Ok(())
}
