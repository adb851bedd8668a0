//! Participant registry
//!
//! identity → 配送チャンネルのマップ。1 つの identity につきエントリは最大 1 つ。
//! 同じ identity で再登録すると古いチャンネルを close してから置き換える。
//!
//! 各エントリには登録ごとに増加する generation を持たせる。配送失敗による削除は
//! generation が一致する場合のみ行い、再 join 後の新しいエントリを誤って消さない。

use std::{collections::HashMap, sync::Arc};

use crate::domain::{DeliveryChannel, ParticipantId};

/// Monotonic registration counter
pub type Generation = u64;

/// Point-in-time view of one registration
#[derive(Clone)]
pub struct RegistryEntry {
    pub identity: ParticipantId,
    pub generation: Generation,
    pub channel: Arc<dyn DeliveryChannel>,
}

/// Mapping from participant identity to its open delivery channel
#[derive(Default)]
pub struct ParticipantRegistry {
    entries: HashMap<ParticipantId, RegistryEntry>,
    next_generation: Generation,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly established channel, closing any superseded one
    ///
    /// Returns the generation assigned to the new entry.
    pub fn register(
        &mut self,
        identity: ParticipantId,
        channel: Arc<dyn DeliveryChannel>,
    ) -> Generation {
        let generation = self.next_generation;
        self.next_generation += 1;

        let entry = RegistryEntry {
            identity: identity.clone(),
            generation,
            channel,
        };
        if let Some(previous) = self.entries.insert(identity, entry) {
            previous.channel.close();
            tracing::debug!(
                "Superseded channel of '{}' (generation {}) closed",
                previous.identity,
                previous.generation
            );
        }

        generation
    }

    /// Close and delete the entry for `identity`
    ///
    /// Returns `false` if there was no entry.
    pub fn remove(&mut self, identity: &ParticipantId) -> bool {
        match self.entries.remove(identity) {
            Some(entry) => {
                entry.channel.close();
                true
            }
            None => false,
        }
    }

    /// Remove the entry only if it is still the registration `generation`
    pub fn remove_if_current(&mut self, identity: &ParticipantId, generation: Generation) -> bool {
        let is_current = self
            .entries
            .get(identity)
            .is_some_and(|entry| entry.generation == generation);
        if is_current {
            self.remove(identity)
        } else {
            false
        }
    }

    /// Copy of the current entries for iteration outside the lock
    pub fn snapshot_entries(&self) -> Vec<RegistryEntry> {
        self.entries.values().cloned().collect()
    }

    /// Registered identities sorted for consistent ordering
    pub fn identities(&self) -> Vec<String> {
        let mut identities: Vec<String> = self
            .entries
            .keys()
            .map(|id| id.as_str().to_string())
            .collect();
        identities.sort();
        identities
    }

    pub fn contains(&self, identity: &ParticipantId) -> bool {
        self.entries.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
