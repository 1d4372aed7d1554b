use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::error::{ChartError, ChartResult};

/// strftime pattern used for tooltip dates, rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLabelFormat {
    pub pattern: String,
}

impl Default for TimeLabelFormat {
    fn default() -> Self {
        Self {
            pattern: "%Y-%m-%d %H:%M".to_owned(),
        }
    }
}

impl TimeLabelFormat {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.pattern.is_empty() {
            return Err(ChartError::InvalidData(
                "time label pattern must not be empty".to_owned(),
            ));
        }
        if StrftimeItems::new(&self.pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ChartError::InvalidData(format!(
                "time label pattern `{}` is not a valid strftime pattern",
                self.pattern
            )));
        }
        Ok(())
    }

    /// Formats Unix seconds. Out-of-range times and unvalidated patterns
    /// that fail to render fall back to the raw number.
    #[must_use]
    pub fn format(&self, unix_seconds: f64) -> String {
        format_unix_seconds(unix_seconds, &self.pattern)
    }
}

/// Currency-style price label: prefix plus fixed decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLabelFormat {
    pub prefix: String,
    pub precision: u8,
}

impl Default for PriceLabelFormat {
    fn default() -> Self {
        Self {
            prefix: "$".to_owned(),
            precision: 2,
        }
    }
}

impl PriceLabelFormat {
    pub fn validate(&self) -> ChartResult<()> {
        if self.precision > 12 {
            return Err(ChartError::InvalidData(
                "price label precision must be <= 12".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn format(&self, price: f64) -> String {
        let precision = usize::from(self.precision);
        if price < 0.0 {
            format!("-{}{:.precision$}", self.prefix, -price)
        } else {
            format!("{}{price:.precision$}", self.prefix)
        }
    }
}

pub(crate) fn format_unix_seconds(unix_seconds: f64, pattern: &str) -> String {
    let Some(datetime) = unix_seconds_to_datetime(unix_seconds) else {
        return format!("{unix_seconds}");
    };
    let mut label = String::new();
    match write!(label, "{}", datetime.format(pattern)) {
        Ok(()) => label,
        Err(_) => format!("{unix_seconds}"),
    }
}
