//! Reporting configuration.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest offset chrono accepts, in minutes.
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Fixed offset from UTC, in minutes, that defines the day boundary for
    /// "today" and for daily/weekly buckets.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl ReportConfig {
    /// Resolve the configured offset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the offset is outside ±18 hours.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            field: "report.utc_offset_minutes".into(),
            reason: format!(
                "{} is outside ±{MAX_OFFSET_MINUTES} minutes",
                self.utc_offset_minutes
            ),
        };
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(invalid());
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(invalid)
    }
}
