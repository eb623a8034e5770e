use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "alarmhook",
    version,
    about = "Turns CloudWatch alarm notifications into Slack messages. Pipe an SNS event via standard input, or use a subcommand to poll CloudWatch.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Process every alarm, not only those currently in ALARM
    #[arg(short, long, global = true)]
    pub all: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the Slack payload instead of posting it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List CloudWatch alarms with their state and last update
    List,

    /// Send a Slack notification for each selected CloudWatch alarm
    Send,
}
