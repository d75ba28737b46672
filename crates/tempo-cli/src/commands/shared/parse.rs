use anyhow::Context;
use chrono::{Days, NaiveDate};

/// Parse a log date: `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_date(raw: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today
            .checked_sub_days(Days::new(1))
            .context("no day before today"),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|error| anyhow::anyhow!("invalid date '{raw}': {error} (expected YYYY-MM-DD)")),
    }
}
