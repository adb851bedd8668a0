//! Append-only message log
//!
//! History replay の唯一の情報源。挿入順 = Hub への到着順。
//! 呼び出し側には常にコピーを返し、内部の `Vec` への参照は渡さない。

use crate::domain::ChatEvent;

/// Append-only ordered sequence of chat events
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    events: Vec<ChatEvent>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its zero-based position
    pub fn append(&mut self, event: ChatEvent) -> usize {
        self.events.push(event);
        self.events.len() - 1
    }

    /// Independent copy of every event recorded so far, in arrival order
    pub fn snapshot(&self) -> Vec<ChatEvent> {
        self.events.clone()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
