mod slack;
mod stdout;

use crate::render::RenderedMessage;
use anyhow::Result;
use async_trait::async_trait;

pub use slack::SlackWebhook;
pub use stdout::StdoutSender;

/// Outbound delivery of a rendered chat message
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver one message. Transport failures are returned as-is.
    async fn send(&self, message: &RenderedMessage) -> Result<()>;

    /// Get a human-readable name for this sender
    fn name(&self) -> &str;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
