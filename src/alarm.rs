use chrono::{DateTime, FixedOffset};

/// State value CloudWatch reports for an alarm that is currently firing
pub const ALARM_STATE: &str = "ALARM";

/// One monitoring alarm and its most recent state transition.
///
/// `state` is kept as the upstream string: CloudWatch uses `OK`, `ALARM` and
/// `INSUFFICIENT_DATA`, but anything else is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub name: String,
    pub description: String,
    pub reason: String,
    pub state: String,
    pub state_change_time: DateTime<FixedOffset>,
}

impl Alarm {
    pub fn is_alarming(&self) -> bool {
        self.state == ALARM_STATE
    }
}
