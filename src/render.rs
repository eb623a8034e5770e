use crate::alarm::Alarm;
use crate::timestamp::format_display;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

pub const URGENT_COLOR: &str = "#c00000";
pub const CALM_COLOR: &str = "#00c000";

/// Prefix that pages everyone active in the channel
pub const URGENT_MENTION: &str = "@here ";

pub const FOOTER: &str = "SNS Event";

/// Slack incoming-webhook payload carrying a single attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub color: String,
    pub pretext: String,
    pub title: String,
    pub fields: Vec<AttachmentField>,
    pub footer: String,
    /// Delivery instant in epoch seconds
    pub ts: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl AttachmentField {
    fn new(title: &str, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            short,
        }
    }
}

/// Build the chat message for an alarm delivered at `delivered_at`.
///
/// The footer timestamp is the raw delivery instant while the "State Change
/// Time" field shows the alarm's own transition in Berlin wall-clock time.
pub fn render(alarm: &Alarm, delivered_at: &DateTime<Tz>) -> RenderedMessage {
    let urgent = alarm.is_alarming();

    let (color, pretext) = if urgent {
        (URGENT_COLOR, format!("{}{}", URGENT_MENTION, alarm.description))
    } else {
        (CALM_COLOR, alarm.description.clone())
    };

    let fields = vec![
        AttachmentField::new("State Reason", alarm.reason.as_str(), false),
        AttachmentField::new("Alarm Name", alarm.name.as_str(), true),
        AttachmentField::new(
            "State Change Time",
            format_display(&alarm.state_change_time),
            true,
        ),
    ];

    RenderedMessage {
        attachments: vec![Attachment {
            color: color.to_string(),
            pretext,
            title: alarm.state.clone(),
            fields,
            footer: FOOTER.to_string(),
            ts: delivered_at.timestamp(),
        }],
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
