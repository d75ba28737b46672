//! Display rows for the time-entry list.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Serialize;
use tempo_core::entities::{Task, TimeLog};

/// Shown for a log whose task is not (or no longer) cached.
pub const UNKNOWN_TASK: &str = "Unknown Task";

/// `"45m"`, `"2h"` or `"1h 30m"`.
#[must_use]
pub fn format_duration(hours: u32, minutes: u32) -> String {
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[must_use]
pub fn task_name<'a>(tasks: &'a [Task], task_id: &str) -> &'a str {
    tasks
        .iter()
        .find(|task| task.id == task_id)
        .map_or(UNKNOWN_TASK, |task| task.name.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LogLine {
    pub id: String,
    pub task: String,
    pub date: NaiveDate,
    pub duration: String,
}

/// One row per log, in cache order.
#[must_use]
pub fn log_lines(logs: &[TimeLog], tasks: &[Task]) -> Vec<LogLine> {
    logs.iter()
        .map(|log| LogLine {
            id: log.id.clone(),
            task: task_name(tasks, &log.task_id).to_string(),
            date: log.date,
            duration: format_duration(log.hours, log.minutes),
        })
        .collect()
}
