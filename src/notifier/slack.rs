use super::MessageSender;
use crate::render::RenderedMessage;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Posts messages to a Slack incoming webhook.
pub struct SlackWebhook {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackWebhook {
    /// `client` is shared for the lifetime of the process.
    pub fn new(webhook_url: String, client: reqwest::Client) -> Self {
        Self {
            webhook_url,
            client,
        }
    }
}

#[async_trait]
impl MessageSender for SlackWebhook {
    async fn send(&self, message: &RenderedMessage) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await
            .context("Failed to reach Slack webhook")?;

        // The response is not inspected beyond logging its status
        tracing::info!(status = %response.status(), "Sent Slack notification");
        Ok(())
    }

    fn name(&self) -> &str {
        "slack"
    }
}
