use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SNS fan-out payload: `{"Records": [{"Sns": {...}}]}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotificationBatch {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub sns: Option<SnsNotification>,
}

/// The part of an SNS record this crate reads. Both fields are optional here
/// so that one broken record does not fail decoding of the whole batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnsNotification {
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<String>,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}

impl NotificationBatch {
    /// Interpret piped input.
    ///
    /// A JSON object with `Records` is a full SNS event. Anything else is taken
    /// as the body of a single alarm message received at `received_at`.
    pub fn from_input(input: &str, received_at: DateTime<Utc>) -> serde_json::Result<Self> {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(input) {
            if value.get("Records").is_some() {
                return serde_json::from_value(value);
            }
        }

        let timestamp = received_at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string();
        Ok(Self {
            records: vec![NotificationRecord::new(timestamp, input.trim())],
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl NotificationRecord {
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sns: Some(SnsNotification {
                timestamp: Some(timestamp.into()),
                message: Some(message.into()),
            }),
        }
    }
}

/// An alarm as returned by a `DescribeAlarms` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolledAlarm {
    pub alarm_name: Option<String>,
    pub alarm_description: Option<String>,
    pub state_reason: Option<String>,
    pub state_value: Option<String>,
    pub state_updated_timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
