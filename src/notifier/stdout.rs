use super::MessageSender;
use crate::render::RenderedMessage;
use anyhow::Result;
use async_trait::async_trait;

/// Prints the payload instead of posting it. Used for `--dry-run`.
pub struct StdoutSender;

#[async_trait]
impl MessageSender for StdoutSender {
    async fn send(&self, message: &RenderedMessage) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(message)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
