//! Conversion logic between wire DTOs and domain entities.

use chatrelay_shared::protocol::ChatEventDto;

use crate::domain::ChatEvent;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&ChatEvent> for ChatEventDto {
    fn from(event: &ChatEvent) -> Self {
        Self {
            sender_identity: event.sender.clone(),
            timestamp: event.timestamp,
            text: event.text.clone(),
        }
    }
}

impl From<ChatEvent> for ChatEventDto {
    fn from(event: ChatEvent) -> Self {
        Self {
            sender_identity: event.sender,
            timestamp: event.timestamp,
            text: event.text,
        }
    }
}

/// Convert a history snapshot for the wire
pub fn history_to_dto(history: Vec<ChatEvent>) -> Vec<ChatEventDto> {
    history.into_iter().map(ChatEventDto::from).collect()
}
