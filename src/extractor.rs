use crate::alarm::Alarm;
use crate::error::MalformedAlarmError;
use crate::event::{NotificationRecord, PolledAlarm};
use crate::timestamp::{parse_delivery_time, parse_state_change_time};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde_json::Value;

/// A decoded alarm message: string keys, any JSON value.
pub type RawMessage = serde_json::Map<String, Value>;

const ALARM_NAME: &str = "AlarmName";
const ALARM_DESCRIPTION: &str = "AlarmDescription";
const NEW_STATE_REASON: &str = "NewStateReason";
const NEW_STATE_VALUE: &str = "NewStateValue";
const STATE_CHANGE_TIME: &str = "StateChangeTime";

/// Decode the JSON string carried in an SNS `Message` and extract the alarm.
pub fn extract_message(body: &str) -> Result<Alarm, MalformedAlarmError> {
    let message: RawMessage =
        serde_json::from_str(body).map_err(|source| MalformedAlarmError::InvalidBody {
            raw: body.to_string(),
            source,
        })?;

    extract_fields(&message, body)
}

/// Extract an alarm from an already decoded message.
pub fn extract_alarm(message: &RawMessage) -> Result<Alarm, MalformedAlarmError> {
    let raw = serde_json::to_string(message).unwrap_or_default();
    extract_fields(message, &raw)
}

/// Extract the alarm and the delivery instant from one SNS record.
pub fn extract_record(
    record: &NotificationRecord,
) -> Result<(Alarm, DateTime<Tz>), MalformedAlarmError> {
    let raw = || serde_json::to_string(record).unwrap_or_default();
    let missing = |field: &'static str| MalformedAlarmError::MissingField { field, raw: raw() };

    let sns = record.sns.as_ref().ok_or_else(|| missing("Sns"))?;
    let timestamp = sns.timestamp.as_deref().ok_or_else(|| missing("Timestamp"))?;
    let body = sns.message.as_deref().ok_or_else(|| missing("Message"))?;

    let delivered_at =
        parse_delivery_time(timestamp).map_err(|source| MalformedAlarmError::InvalidTimestamp {
            field: "Timestamp",
            raw: raw(),
            source,
        })?;

    let alarm = extract_message(body)?;
    Ok((alarm, delivered_at))
}

fn extract_fields(message: &RawMessage, raw: &str) -> Result<Alarm, MalformedAlarmError> {
    let name = required_str(message, ALARM_NAME, raw)?;
    let description = match message.get(ALARM_DESCRIPTION) {
        // CloudWatch sends null for alarms created without a description
        Some(Value::Null) => "",
        _ => required_str(message, ALARM_DESCRIPTION, raw)?,
    };
    let reason = required_str(message, NEW_STATE_REASON, raw)?;
    let state = required_str(message, NEW_STATE_VALUE, raw)?;
    let changed = required_str(message, STATE_CHANGE_TIME, raw)?;

    let state_change_time =
        parse_state_change_time(changed).map_err(|source| MalformedAlarmError::InvalidTimestamp {
            field: STATE_CHANGE_TIME,
            raw: raw.to_string(),
            source,
        })?;

    build(name, description, reason, state, state_change_time, raw)
}

fn required_str<'a>(
    message: &'a RawMessage,
    field: &'static str,
    raw: &str,
) -> Result<&'a str, MalformedAlarmError> {
    match message.get(field) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(MalformedAlarmError::InvalidField {
            field,
            raw: raw.to_string(),
        }),
        None => Err(MalformedAlarmError::MissingField {
            field,
            raw: raw.to_string(),
        }),
    }
}

fn build(
    name: &str,
    description: &str,
    reason: &str,
    state: &str,
    state_change_time: DateTime<FixedOffset>,
    raw: &str,
) -> Result<Alarm, MalformedAlarmError> {
    if name.trim().is_empty() {
        return Err(MalformedAlarmError::EmptyName {
            raw: raw.to_string(),
        });
    }

    Ok(Alarm {
        name: name.to_string(),
        description: description.to_string(),
        reason: reason.to_string(),
        state: state.to_string(),
        state_change_time,
    })
}

impl TryFrom<&PolledAlarm> for Alarm {
    type Error = MalformedAlarmError;

    fn try_from(polled: &PolledAlarm) -> Result<Self, Self::Error> {
        let raw = || format!("{:?}", polled);
        let missing = |field: &'static str| MalformedAlarmError::MissingField { field, raw: raw() };

        let name = polled.alarm_name.as_deref().ok_or_else(|| missing(ALARM_NAME))?;
        let description = polled
            .alarm_description
            .as_deref()
            .ok_or_else(|| missing(ALARM_DESCRIPTION))?;
        let reason = polled.state_reason.as_deref().ok_or_else(|| missing("StateReason"))?;
        let state = polled.state_value.as_deref().ok_or_else(|| missing("StateValue"))?;
        let updated = polled
            .state_updated_timestamp
            .ok_or_else(|| missing("StateUpdatedTimestamp"))?;

        build(name, description, reason, state, updated.into(), &raw())
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
