//! Report shapes handed to presentation.
//!
//! Every figure carries exact whole minutes next to the display hours, which
//! are rounded half-up to one decimal.

use chrono::{DateTime, NaiveDate, TimeZone};
use schemars::JsonSchema;
use serde::Serialize;
use tempo_core::entities::{Task, TimeLog};

use crate::engine;

/// One bar of the daily or weekly series.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SeriesPoint {
    pub label: String,
    /// First calendar day covered, inclusive.
    pub start: NaiveDate,
    /// Last calendar day covered, inclusive.
    pub end: NaiveDate,
    pub minutes: u64,
    pub hours: f64,
}

/// Hours logged against one task.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TaskShare {
    pub task_id: String,
    pub name: String,
    pub minutes: u64,
    pub hours: f64,
}

/// Every statistic shown on the reports view, computed in one pass over the
/// current cache contents.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ReportSnapshot {
    /// The calendar day the report was anchored on.
    pub today: NaiveDate,
    pub total_hours: f64,
    pub active_tasks: usize,
    pub average_daily_hours: f64,
    pub daily: Vec<SeriesPoint>,
    pub weekly: Vec<SeriesPoint>,
    pub distribution: Vec<TaskShare>,
}

impl ReportSnapshot {
    #[must_use]
    pub fn compute<Tz: TimeZone>(logs: &[TimeLog], tasks: &[Task], now: &DateTime<Tz>) -> Self {
        Self {
            today: now.date_naive(),
            total_hours: engine::total_hours(logs),
            active_tasks: engine::active_task_count(tasks),
            average_daily_hours: engine::average_daily_hours(logs),
            daily: engine::daily_series(logs, now),
            weekly: engine::weekly_series(logs, now),
            distribution: engine::task_distribution(logs, tasks),
        }
    }
}
