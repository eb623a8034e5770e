use thiserror::Error;

/// A timestamp string that matches none of the accepted upstream formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized timestamp '{input}'")]
pub struct TimeParseError {
    pub input: String,
}

impl TimeParseError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// A notification that cannot be turned into an [`Alarm`](crate::alarm::Alarm).
///
/// Every variant keeps the offending payload so the caller can log it before
/// skipping the record.
#[derive(Debug, Error)]
pub enum MalformedAlarmError {
    #[error("message body is not a JSON object: {source}")]
    InvalidBody {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required field '{field}'")]
    MissingField { field: &'static str, raw: String },

    #[error("field '{field}' is not a string")]
    InvalidField { field: &'static str, raw: String },

    #[error("alarm name is empty")]
    EmptyName { raw: String },

    #[error("invalid {field}: {source}")]
    InvalidTimestamp {
        field: &'static str,
        raw: String,
        #[source]
        source: TimeParseError,
    },
}

impl MalformedAlarmError {
    /// The raw payload that failed extraction.
    pub fn raw(&self) -> &str {
        match self {
            Self::InvalidBody { raw, .. }
            | Self::MissingField { raw, .. }
            | Self::InvalidField { raw, .. }
            | Self::EmptyName { raw }
            | Self::InvalidTimestamp { raw, .. } => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no webhook endpoint configured: set SLACK_WEBHOOK_URL or `webhook_url` in the config file")]
    MissingWebhookUrl,
}
