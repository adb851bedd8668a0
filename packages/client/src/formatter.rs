//! Message formatting utilities for client display.

use chatrelay_shared::{
    protocol::ChatEventDto,
    time::{format_date_time, format_time_of_day},
};

const BANNER_RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one chat event as `[HH:MM:SS] sender: text`
    pub fn format_event(event: &ChatEventDto) -> String {
        format!(
            "[{}] {}: {}",
            format_time_of_day(&event.timestamp),
            event.sender_identity,
            event.text
        )
    }

    /// Format a replayed history event with its full date
    pub fn format_history_event(event: &ChatEventDto) -> String {
        format!(
            "[{}] {}: {}",
            format_date_time(&event.timestamp),
            event.sender_identity,
            event.text
        )
    }

    /// Format an event pushed by the hub while the prompt is displayed
    pub fn format_incoming(event: &ChatEventDto) -> String {
        format!("\n{}\n", Self::format_event(event))
    }

    /// Format the history returned by join
    ///
    /// # Arguments
    ///
    /// * `history` - Events in hub order
    /// * `identity` - The current participant's identity
    pub fn format_history(history: &[ChatEventDto], identity: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(BANNER_RULE);
        output.push('\n');
        output.push_str(&format!("Joined as '{}'. History:\n", identity));

        if history.is_empty() {
            output.push_str("(No messages)\n");
        } else {
            for event in history {
                output.push_str(&Self::format_history_event(event));
                output.push('\n');
            }
        }

        output.push_str(BANNER_RULE);
        output.push('\n');
        output
    }
}
