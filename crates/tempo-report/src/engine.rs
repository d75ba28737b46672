//! Aggregation over cached time logs.
//!
//! All functions are pure. Durations are summed as whole minutes and
//! converted to hours once, rounded half-up to one decimal. Days are compared
//! as calendar dates; "today" is the date of `now` in its own time zone.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use tempo_core::entities::{Task, TimeLog};

use crate::snapshot::{SeriesPoint, TaskShare};

/// Number of points in [`daily_series`].
pub const DAILY_POINTS: u64 = 7;

/// Number of points in [`weekly_series`].
pub const WEEKLY_POINTS: u64 = 4;

#[allow(clippy::cast_precision_loss)]
fn from_tenths(tenths: u64) -> f64 {
    tenths as f64 / 10.0
}

/// Convert minutes to hours rounded half-up to one decimal.
#[must_use]
pub fn minutes_to_hours(minutes: u64) -> f64 {
    // tenths of an hour = round(minutes / 6)
    from_tenths(minutes.saturating_add(3) / 6)
}

fn sum_minutes<'a>(logs: impl IntoIterator<Item = &'a TimeLog>) -> u64 {
    logs.into_iter().map(TimeLog::total_minutes).sum()
}

fn minutes_between(logs: &[TimeLog], start: NaiveDate, end: NaiveDate) -> u64 {
    sum_minutes(logs.iter().filter(|log| log.date >= start && log.date <= end))
}

/// Total logged time in hours.
#[must_use]
pub fn total_hours(logs: &[TimeLog]) -> f64 {
    minutes_to_hours(sum_minutes(logs))
}

/// Number of cached tasks, whether or not any time was logged against them.
#[must_use]
pub const fn active_task_count(tasks: &[Task]) -> usize {
    tasks.len()
}

/// Total hours divided by the number of distinct logged dates.
///
/// Days without logs do not count. With no logs the result is zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn average_daily_hours(logs: &[TimeLog]) -> f64 {
    let days: HashSet<NaiveDate> = logs.iter().map(|log| log.date).collect();
    let divisor = days.len().max(1) as u64;
    let total = sum_minutes(logs);
    from_tenths(total.saturating_add(3 * divisor) / (6 * divisor))
}

/// Seven daily points ending today, oldest first, labelled with the short
/// weekday name.
#[must_use]
pub fn daily_series<Tz: TimeZone>(logs: &[TimeLog], now: &DateTime<Tz>) -> Vec<SeriesPoint> {
    let today = now.date_naive();
    let first = today
        .checked_sub_days(Days::new(DAILY_POINTS - 1))
        .unwrap_or(NaiveDate::MIN);

    first
        .iter_days()
        .take(DAILY_POINTS as usize)
        .map(|day| {
            let minutes = minutes_between(logs, day, day);
            SeriesPoint {
                label: day.format("%a").to_string(),
                start: day,
                end: day,
                minutes,
                hours: minutes_to_hours(minutes),
            }
        })
        .collect()
}

/// Four Sunday-to-Saturday weeks, the last one containing today, oldest
/// first. Both ends of each week are inclusive.
#[must_use]
pub fn weekly_series<Tz: TimeZone>(logs: &[TimeLog], now: &DateTime<Tz>) -> Vec<SeriesPoint> {
    let today = now.date_naive();
    let this_sunday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_sunday())))
        .unwrap_or(NaiveDate::MIN);
    let first = this_sunday
        .checked_sub_days(Days::new(7 * (WEEKLY_POINTS - 1)))
        .unwrap_or(NaiveDate::MIN);

    first
        .iter_weeks()
        .take(WEEKLY_POINTS as usize)
        .map(|start| {
            let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
            let minutes = minutes_between(logs, start, end);
            SeriesPoint {
                label: format!("Week of {}", start.format("%b %-d")),
                start,
                end,
                minutes,
                hours: minutes_to_hours(minutes),
            }
        })
        .collect()
}

/// Hours per task in cache order. Tasks without logs appear with zero; logs
/// of unknown tasks are ignored.
#[must_use]
pub fn task_distribution(logs: &[TimeLog], tasks: &[Task]) -> Vec<TaskShare> {
    let mut per_task: HashMap<&str, u64> = HashMap::new();
    for log in logs {
        *per_task.entry(log.task_id.as_str()).or_default() += log.total_minutes();
    }

    tasks
        .iter()
        .map(|task| {
            let minutes = per_task.get(task.id.as_str()).copied().unwrap_or(0);
            TaskShare {
                task_id: task.id.clone(),
                name: task.name.clone(),
                minutes,
                hours: minutes_to_hours(minutes),
            }
        })
        .collect()
}
