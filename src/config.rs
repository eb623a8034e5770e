use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const WEBHOOK_URL_ENV: &str = "SLACK_WEBHOOK_URL";
pub const PROCESS_ALL_ENV: &str = "PROCESS_ALL";
pub const REGION_ENV: &str = "AWS_REGION";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Slack incoming-webhook URL
    pub webhook_url: Option<String>,
    /// AWS region for CloudWatch; the SDK default chain applies when unset
    pub region: Option<String>,
    /// Send every alarm instead of only those in `ALARM`
    pub process_all: Option<bool>,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Environment values win over file values.
    pub fn merge_with_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(WEBHOOK_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.webhook_url = Some(url);
        }
        if let Some(region) = lookup(REGION_ENV).filter(|region| !region.trim().is_empty()) {
            self.region = Some(region);
        }
        if let Some(flag) = lookup(PROCESS_ALL_ENV) {
            self.process_all = Some(parse_flag(&flag));
        }
    }

    /// The webhook URL, required before anything is sent.
    pub fn webhook_url(&self) -> Result<&str, ConfigurationError> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigurationError::MissingWebhookUrl)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
