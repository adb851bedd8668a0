//! Broadcast engine
//!
//! キューから 1 件ずつイベントを取り出し、送信元以外の全参加者へ並行に配送する。
//!
//! 1. レジストリの snapshot を取得（ロックは配送中に保持しない）
//! 2. 受信者ごとに 1 タスクを spawn し、各配送を `delivery_timeout` で打ち切る
//! 3. 全タスクの完了を待ってから次のイベントへ進む（同時に処理中のイベントは常に 1 件）
//! 4. 失敗した受信者（タイムアウトや配送タスクの panic を含む）はレジストリから削除する。
//!    再送も送信者への通知もしない

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinSet};

use crate::domain::{ChatEvent, DeliveryError, ParticipantId};

use super::{registry::RegistryEntry, state::SharedState};

/// One queued fan-out job
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BroadcastItem {
    pub event: ChatEvent,
    /// Identity that must not receive this event
    pub origin: String,
}

impl BroadcastItem {
    /// A submitted message, excluded from its own sender
    pub fn message(event: ChatEvent) -> Self {
        let origin = event.sender.clone();
        Self { event, origin }
    }

    /// A join notice, excluded from the participant who just joined
    pub fn join_notice(event: ChatEvent, participant: &ParticipantId) -> Self {
        Self {
            event,
            origin: participant.as_str().to_string(),
        }
    }
}

/// Outcome of fanning out one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Recipients that acknowledged the event, sorted
    pub delivered: Vec<ParticipantId>,
    /// Recipients removed from the registry after a failed delivery, sorted
    pub pruned: Vec<ParticipantId>,
}

/// Long-lived consumer of the broadcast queue
pub struct BroadcastEngine {
    state: SharedState,
    queue: mpsc::Receiver<BroadcastItem>,
    delivery_timeout: Duration,
}

impl BroadcastEngine {
    pub(crate) fn new(
        state: SharedState,
        queue: mpsc::Receiver<BroadcastItem>,
        delivery_timeout: Duration,
    ) -> Self {
        Self {
            state,
            queue,
            delivery_timeout,
        }
    }

    /// Process queued events until every producer is gone
    pub async fn run(mut self) {
        tracing::info!(
            "Broadcast engine started (delivery timeout {:?})",
            self.delivery_timeout
        );

        while let Some(item) = self.queue.recv().await {
            let report = self.fan_out(item).await;
            tracing::debug!(
                "Fan-out finished: {} delivered, {} pruned",
                report.delivered.len(),
                report.pruned.len()
            );
        }

        tracing::info!("Broadcast queue closed, broadcast engine stopped");
    }

    pub(crate) async fn fan_out(&self, item: BroadcastItem) -> FanOutReport {
        let BroadcastItem { event, origin } = item;
        let event = Arc::new(event);

        let recipients: Vec<RegistryEntry> = {
            let state = self.state.lock().await;
            state.registry.snapshot_entries()
        };

        let mut deliveries = JoinSet::new();
        let mut recipients_by_task = HashMap::new();
        for entry in recipients
            .into_iter()
            .filter(|entry| entry.identity.as_str() != origin)
        {
            let event = Arc::clone(&event);
            let timeout = self.delivery_timeout;
            let channel = Arc::clone(&entry.channel);
            let handle = deliveries.spawn(async move {
                match tokio::time::timeout(timeout, channel.deliver(&event)).await {
                    Ok(result) => result,
                    Err(_) => Err(DeliveryError::Timeout(timeout)),
                }
            });
            recipients_by_task.insert(handle.id(), (entry.identity, entry.generation));
        }

        let mut report = FanOutReport::default();
        let mut failures = Vec::new();
        while let Some(joined) = deliveries.join_next_with_id().await {
            let (task_id, result) = match joined {
                Ok((task_id, result)) => (task_id, result),
                Err(error) => {
                    let reason = error.to_string();
                    (error.id(), Err(DeliveryError::Transport(reason)))
                }
            };
            let Some((identity, generation)) = recipients_by_task.remove(&task_id) else {
                tracing::error!("Delivery task {} finished for an unknown recipient", task_id);
                continue;
            };

            match result {
                Ok(()) => {
                    tracing::debug!("Delivered event from '{}' to '{}'", event.sender, identity);
                    report.delivered.push(identity);
                }
                Err(error) => {
                    tracing::warn!(
                        "Delivery to '{}' failed: {}. Removing participant",
                        identity,
                        error
                    );
                    failures.push((identity, generation));
                }
            }
        }

        if !failures.is_empty() {
            let mut state = self.state.lock().await;
            for (identity, generation) in failures {
                if state.registry.remove_if_current(&identity, generation) {
                    report.pruned.push(identity);
                } else {
                    tracing::debug!(
                        "'{}' re-joined during fan-out, keeping the newer registration",
                        identity
                    );
                }
            }
            tracing::info!(
                "Pruned {} participant(s), {} remaining",
                report.pruned.len(),
                state.registry.len()
            );
        }

        report.delivered.sort();
        report.pruned.sort();
        report
    }
}
