use crate::alarm::ALARM_STATE;
use crate::event::PolledAlarm;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatch::config::Region;
use aws_sdk_cloudwatch::types::{MetricAlarm, StateValue};
use chrono::{DateTime, Utc};

/// Where polled alarms come from
#[async_trait]
pub trait AlarmSource: Send + Sync {
    /// Current alarms, restricted to those in `ALARM` unless `process_all` is set.
    async fn describe_alarms(&self, process_all: bool) -> Result<Vec<PolledAlarm>>;
}

/// Keep only firing alarms unless `process_all` is set.
pub fn select_alarms(alarms: Vec<PolledAlarm>, process_all: bool) -> Vec<PolledAlarm> {
    if process_all {
        return alarms;
    }

    alarms
        .into_iter()
        .filter(|alarm| alarm.state_value.as_deref() == Some(ALARM_STATE))
        .collect()
}

/// Reads metric alarms through the CloudWatch `DescribeAlarms` API.
pub struct CloudWatchSource {
    client: aws_sdk_cloudwatch::Client,
}

impl CloudWatchSource {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential and region chain.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        Self::new(aws_sdk_cloudwatch::Client::new(&sdk_config))
    }
}

#[async_trait]
impl AlarmSource for CloudWatchSource {
    async fn describe_alarms(&self, process_all: bool) -> Result<Vec<PolledAlarm>> {
        let mut alarms = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.describe_alarms().set_next_token(next_token.take());
            if !process_all {
                request = request.state_value(StateValue::Alarm);
            }

            let output = request
                .send()
                .await
                .context("CloudWatch DescribeAlarms request failed")?;

            alarms.extend(output.metric_alarms().iter().map(polled_alarm));
            tracing::debug!("Fetched {} alarms so far", alarms.len());

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(select_alarms(alarms, process_all))
    }
}

fn polled_alarm(alarm: &MetricAlarm) -> PolledAlarm {
    PolledAlarm {
        alarm_name: alarm.alarm_name().map(str::to_string),
        alarm_description: alarm.alarm_description().map(str::to_string),
        state_reason: alarm.state_reason().map(str::to_string),
        state_value: alarm.state_value().map(|state| state.as_str().to_string()),
        state_updated_timestamp: alarm
            .state_updated_timestamp()
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos())),
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
