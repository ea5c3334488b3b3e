//! Post-commit notification of completed transfers
//!
//! Events are staged while the store transaction is open and delivered only
//! after a successful commit. Delivery mechanics are external; a sink failure
//! is logged and never surfaces to the transfer caller.

use crate::ledger::TransferRecord;
use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

/// Which side of the transfer an event is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Sent,
    Received,
}

/// Event pushed to the notification sink once per party of a committed
/// transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferCompleted {
    pub account_id: i64,
    pub perspective: Perspective,
    pub record: TransferRecord,
}

impl TransferCompleted {
    /// Build both per-party events for a committed record
    pub fn for_record(record: &TransferRecord) -> [TransferCompleted; 2] {
        [
            TransferCompleted {
                account_id: record.sender_id,
                perspective: Perspective::Sent,
                record: record.clone(),
            },
            TransferCompleted {
                account_id: record.receiver_id,
                perspective: Perspective::Received,
                record: record.clone(),
            },
        ]
    }
}

/// External collaborator receiving completed-transfer events
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, event: TransferCompleted) -> anyhow::Result<()>;
}

/// Sink that writes the event payload to the log. Stands in for a real
/// transport in jobs and local runs.
pub struct LoggingSink;

#[async_trait]
impl NotificationSink for LoggingSink {
    async fn deliver(&self, event: TransferCompleted) -> anyhow::Result<()> {
        tracing::info!(
            target: "notify",
            account_id = event.account_id,
            payload = %serde_json::to_string(&event)?,
            "transfer.completed"
        );
        Ok(())
    }
}

/// Events collected during a transaction. Dropping the queue without calling
/// [`PostCommitQueue::run`] discards them, which is exactly what a rollback
/// needs.
#[derive(Default)]
pub struct PostCommitQueue {
    events: Vec<TransferCompleted>,
}

impl PostCommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TransferCompleted) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = TransferCompleted>) {
        self.events.extend(events);
    }

    /// Deliver all staged events in order. Failures are logged per event and
    /// do not stop the rest of the queue.
    pub async fn run(self, sink: &dyn NotificationSink) {
        for event in self.events {
            let transfer_id = event.record.id;
            let account_id = event.account_id;
            if let Err(err) = sink.deliver(event).await {
                warn!(
                    transfer_id,
                    account_id,
                    error = %err,
                    "Notification delivery failed, transfer is already committed"
                );
            }
        }
    }
}
