use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub resolver: Option<String>,
    pub doh: Option<String>,
    pub concurrency: Option<usize>,
    pub display_interval: Option<u64>,
    pub batch_size: Option<usize>,
    pub verbose: Option<bool>,
    pub iterative: Option<bool>,
    #[serde(alias = "random_ids")]
    pub random: Option<bool>,
    pub flood: Option<bool>,
    pub flood_limit: Option<usize>,
    #[serde(rename = "type", alias = "record_type")]
    pub record_type: Option<String>,
    pub timeout: Option<DurationValue>,
    pub duration: Option<DurationValue>,
    pub no_color: Option<bool>,
    pub domains: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(AppError::validation(
                        crate::error::ValidationError::DurationZero,
                    ))
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
