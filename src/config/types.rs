use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration;
use crate::error::ValidationError;

/// Run options accepted from `uriload.toml` / `uriload.json`.
///
/// Every field is optional; CLI values given explicitly always win.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub workers: Option<usize>,
    pub keepalive: Option<bool>,
    pub variable_length: Option<bool>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
}

/// Duration given either as bare seconds or as text with a unit suffix.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
