//! Drafts for creating entities and the task update builder.
//!
//! A draft carries only the client-chosen fields. The remote service adds
//! `id`, `owner_id` and `created_at`. Every draft validates itself before it
//! is submitted, so invalid entries never reach the remote side.

use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::{Entity, Task, TimeLog};
use crate::errors::CoreError;

/// Upper bound for the `hours` field of a time log.
pub const MAX_HOURS: u32 = 24;

/// Upper bound for the `minutes` field of a time log.
pub const MAX_MINUTES: u32 = 59;

/// Client-side payload for a new entity.
pub trait Draft: Serialize + Send + Sync {
    type Entity: Entity;

    /// Check the draft against its invariants.
    ///
    /// `today` is the caller's current calendar date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violated rule.
    fn validate(&self, today: NaiveDate) -> Result<(), CoreError>;
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("task name must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TaskDraft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub name: String,
    pub description: Option<String>,
}

impl TaskDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Draft for TaskDraft {
    type Entity = Task;

    fn validate(&self, _today: NaiveDate) -> Result<(), CoreError> {
        validate_name(&self.name)
    }
}

// ---------------------------------------------------------------------------
// TimeLogDraft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeLogDraft {
    pub task_id: String,
    pub hours: u32,
    pub minutes: u32,
    pub date: NaiveDate,
}

impl TimeLogDraft {
    #[must_use]
    pub fn new(task_id: impl Into<String>, hours: u32, minutes: u32, date: NaiveDate) -> Self {
        Self {
            task_id: task_id.into(),
            hours,
            minutes,
            date,
        }
    }
}

impl Draft for TimeLogDraft {
    type Entity = TimeLog;

    fn validate(&self, today: NaiveDate) -> Result<(), CoreError> {
        if self.task_id.trim().is_empty() {
            return Err(CoreError::Validation("time log must reference a task".into()));
        }
        if self.hours > MAX_HOURS {
            return Err(CoreError::Validation(format!(
                "hours must be between 0 and {MAX_HOURS}, got {}",
                self.hours
            )));
        }
        if self.minutes > MAX_MINUTES {
            return Err(CoreError::Validation(format!(
                "minutes must be between 0 and {MAX_MINUTES}, got {}",
                self.minutes
            )));
        }
        if self.hours == 0 && self.minutes == 0 {
            return Err(CoreError::Validation(
                "time log duration must be greater than zero".into(),
            ));
        }
        if self.date > today {
            return Err(CoreError::Validation(format!(
                "time log date {} is later than today ({today})",
                self.date
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TaskUpdate
// ---------------------------------------------------------------------------

/// Partial task update. Only `Some` fields are sent to the remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` when a new name is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    /// Set or clear the description. `None` clears it remotely.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}
