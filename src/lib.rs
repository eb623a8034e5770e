//! CloudWatch alarm notifications rendered as Slack messages.
//!
//! Alarm events arrive either as an SNS fan-out batch or from a
//! `DescribeAlarms` poll. Each one is normalized into an [`alarm::Alarm`],
//! rendered into a Slack attachment and handed to a [`notifier::MessageSender`].

pub mod alarm;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod extractor;
pub mod notifier;
pub mod render;
pub mod source;
pub mod timestamp;

use anyhow::Result;
use config::Config;
use notifier::{MessageSender, SlackWebhook, StdoutSender};
use std::sync::Arc;

/// Build the outbound sender for this process.
///
/// Fails with [`error::ConfigurationError`] when a real send is requested
/// without a webhook URL.
pub fn build_sender(
    config: &Config,
    client: reqwest::Client,
    dry_run: bool,
) -> Result<Arc<dyn MessageSender>> {
    if dry_run {
        return Ok(Arc::new(StdoutSender));
    }

    let url = config.webhook_url()?;
    Ok(Arc::new(SlackWebhook::new(url.to_string(), client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn test_build_sender_requires_webhook_url() {
        let err = build_sender(&Config::default(), reqwest::Client::new(), false)
            .err()
            .unwrap();

        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::MissingWebhookUrl)
        );
    }

    #[test]
    fn test_build_sender_dry_run_needs_no_url() {
        let sender = build_sender(&Config::default(), reqwest::Client::new(), true).unwrap();
        assert_eq!(sender.name(), "stdout");
    }

    #[test]
    fn test_build_sender_slack() {
        let config = Config {
            webhook_url: Some("https://hooks.slack.com/services/T000/B000/XXXX".to_string()),
            ..Default::default()
        };

        let sender = build_sender(&config, reqwest::Client::new(), false).unwrap();
        assert_eq!(sender.name(), "slack");
    }
}
