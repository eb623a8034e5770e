use alarmhook::alarm::Alarm;
use alarmhook::cli::{Cli, Commands};
use alarmhook::config::Config;
use alarmhook::dispatcher::NotificationDispatcher;
use alarmhook::event::NotificationBatch;
use alarmhook::source::{AlarmSource, CloudWatchSource};
use alarmhook::timestamp::{format_display, DISPLAY_TIMEZONE};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::io::Read;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // .env is optional
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.merge_with_env(|key| std::env::var(key).ok());
    let process_all = cli.all || config.process_all.unwrap_or(false);

    match cli.command {
        Some(Commands::List) => handle_list(&config, process_all).await?,
        Some(Commands::Send) => handle_send(&config, process_all, cli.dry_run).await?,
        None => handle_stdin(&config, process_all, cli.dry_run).await?,
    }

    Ok(())
}

async fn handle_list(config: &Config, process_all: bool) -> Result<()> {
    let source = CloudWatchSource::from_env(config.region.clone()).await;
    let alarms = source.describe_alarms(process_all).await?;

    println!("\n🔔 Alarms: {}", alarms.len());
    for alarm in &alarms {
        let updated = alarm
            .state_updated_timestamp
            .map(|ts| format_display(&ts))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<40} {:<18} {}",
            alarm.alarm_name.as_deref().unwrap_or("-"),
            alarm.state_value.as_deref().unwrap_or("-"),
            updated
        );
    }

    Ok(())
}

async fn handle_send(config: &Config, process_all: bool, dry_run: bool) -> Result<()> {
    let sender = alarmhook::build_sender(config, reqwest::Client::new(), dry_run)?;
    let source = CloudWatchSource::from_env(config.region.clone()).await;
    let polled = source.describe_alarms(process_all).await?;

    let mut alarms = Vec::with_capacity(polled.len());
    for alarm in &polled {
        match Alarm::try_from(alarm) {
            Ok(alarm) => alarms.push(alarm),
            Err(e) => tracing::warn!(raw = %e.raw(), "Skipping malformed alarm: {}", e),
        }
    }

    let dispatcher = NotificationDispatcher::new(sender, process_all);
    let delivered_at = Utc::now().with_timezone(&DISPLAY_TIMEZONE);
    let sent = dispatcher.dispatch_alarms(&alarms, &delivered_at).await?;

    tracing::info!("Sent {} of {} alarm notifications", sent, polled.len());
    Ok(())
}

async fn handle_stdin(config: &Config, process_all: bool, dry_run: bool) -> Result<()> {
    let sender = alarmhook::build_sender(config, reqwest::Client::new(), dry_run)?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read event from standard input")?;

    let batch = NotificationBatch::from_input(&input, Utc::now())
        .context("Standard input is not a valid SNS event")?;

    let dispatcher = NotificationDispatcher::new(sender, process_all);
    if dispatcher.process_batch(&batch).await? {
        tracing::info!("Slack Notification was sent successfully.");
    } else {
        tracing::info!("No Slack Notification was sent.");
    }

    Ok(())
}
