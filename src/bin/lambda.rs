use alarmhook::config::Config;
use alarmhook::dispatcher::NotificationDispatcher;
use alarmhook::event::NotificationBatch;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time().with_target(false))
        .with(filter)
        .init();

    let mut config = Config::default();
    config.merge_with_env(|key| std::env::var(key).ok());

    let sender = alarmhook::build_sender(&config, reqwest::Client::new(), false)?;
    let dispatcher = NotificationDispatcher::new(sender, config.process_all.unwrap_or(true));
    let dispatcher = &dispatcher;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(dispatcher, event).await
    }))
    .await
}

async fn handler(
    dispatcher: &NotificationDispatcher,
    event: LambdaEvent<Value>,
) -> Result<Value, lambda_runtime::Error> {
    let batch: NotificationBatch = serde_json::from_value(event.payload)?;
    tracing::info!(request_id = %event.context.request_id, "Received {} records", batch.records.len());

    let processed = dispatcher.process_batch(&batch).await?;

    Ok(json!({
        "message": if processed {
            "Slack Notification was sent successfully."
        } else {
            "No Slack Notification was sent."
        }
    }))
}
