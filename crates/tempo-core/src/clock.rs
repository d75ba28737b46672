//! Injectable wall clock.
//!
//! Log dates are plain calendar dates. "Today" is the calendar date of the
//! clock's `now()` in the clock's own fixed offset, so every caller that
//! shares a clock agrees on the day boundary.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Reads the system time, shifted into a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_today_uses_its_offset() {
        // 23:30 UTC on Jan 1 is already Jan 2 at +02:00.
        let instant = DateTime::parse_from_rfc3339("2024-01-02T01:30:00+02:00").unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(
            instant.with_timezone(&Utc).date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn system_clock_keeps_offset() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let clock = SystemClock::new(offset);
        assert_eq!(clock.now().offset(), &offset);
    }
}
