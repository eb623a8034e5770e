use crate::alarm::Alarm;
use crate::event::{NotificationBatch, NotificationRecord};
use crate::extractor::extract_record;
use crate::notifier::MessageSender;
use crate::render::render;
use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use std::sync::Arc;

/// Runs extraction, rendering and delivery for each notification, in order.
pub struct NotificationDispatcher {
    sender: Arc<dyn MessageSender>,
    process_all: bool,
}

impl NotificationDispatcher {
    /// With `process_all` unset only alarms in the `ALARM` state are sent.
    pub fn new(sender: Arc<dyn MessageSender>, process_all: bool) -> Self {
        Self {
            sender,
            process_all,
        }
    }

    /// Process every record of `batch`.
    ///
    /// Malformed records are logged and skipped. Returns `true` when at least
    /// one message was handed to the sender. A transport error from the sender
    /// stops the batch and is returned to the caller.
    pub async fn process_batch(&self, batch: &NotificationBatch) -> Result<bool> {
        let mut sent = 0usize;

        for (index, record) in batch.records.iter().enumerate() {
            if self.process_record(index, record).await? {
                sent += 1;
            }
        }

        tracing::info!(
            "Processed {} of {} notification records",
            sent,
            batch.records.len()
        );
        Ok(sent > 0)
    }

    /// Send one message per alarm, all stamped with the same delivery instant.
    /// Returns the number of messages sent.
    pub async fn dispatch_alarms(&self, alarms: &[Alarm], delivered_at: &DateTime<Tz>) -> Result<usize> {
        let mut sent = 0usize;

        for alarm in alarms {
            if self.deliver(alarm, delivered_at).await? {
                sent += 1;
            }
        }

        Ok(sent)
    }

    async fn process_record(&self, index: usize, record: &NotificationRecord) -> Result<bool> {
        let (alarm, delivered_at) = match extract_record(record) {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::warn!(
                    record = index,
                    raw = %e.raw(),
                    "Skipping malformed notification: {}",
                    e
                );
                return Ok(false);
            }
        };

        self.deliver(&alarm, &delivered_at).await
    }

    async fn deliver(&self, alarm: &Alarm, delivered_at: &DateTime<Tz>) -> Result<bool> {
        if !self.process_all && !alarm.is_alarming() {
            tracing::debug!("Ignoring alarm '{}' in state {}", alarm.name, alarm.state);
            return Ok(false);
        }

        let message = render(alarm, delivered_at);
        self.sender.send(&message).await?;

        tracing::debug!(
            "Dispatched alarm '{}' ({}) via {}",
            alarm.name,
            alarm.state,
            self.sender.name()
        );
        Ok(true)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
