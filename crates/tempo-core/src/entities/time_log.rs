use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Entity;
use crate::enums::{Collection, OrderBy};

/// A duration of work recorded against a task on a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimeLog {
    pub id: String,
    pub task_id: String,
    pub owner_id: String,
    pub hours: u32,
    pub minutes: u32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TimeLog {
    /// Logged duration in whole minutes.
    #[must_use]
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.hours) * 60 + u64::from(self.minutes)
    }
}

impl Entity for TimeLog {
    const COLLECTION: Collection = Collection::TimeLogs;
    const ORDER_BY: OrderBy = OrderBy::desc("date");

    fn id(&self) -> &str {
        &self.id
    }
}
