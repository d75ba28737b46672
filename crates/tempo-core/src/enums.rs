//! Collections, filters and ordering used by the remote contract.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{PREFIX_TASK, PREFIX_TIME_LOG};

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// A remote collection of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Tasks,
    TimeLogs,
}

impl Collection {
    /// Table / collection name on the remote side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::TimeLogs => "time_logs",
        }
    }

    /// Prefix for server-assigned identifiers in this collection.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Tasks => PREFIX_TASK,
            Self::TimeLogs => PREFIX_TIME_LOG,
        }
    }

    /// Every column a record of this collection may carry.
    ///
    /// Remote backends reject unknown keys instead of interpolating them into
    /// statements.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Tasks => &["id", "owner_id", "name", "description", "created_at"],
            Self::TimeLogs => &[
                "id",
                "task_id",
                "owner_id",
                "hours",
                "minutes",
                "date",
                "created_at",
            ],
        }
    }

    /// Columns that the client may change after creation.
    #[must_use]
    pub const fn mutable_columns(self) -> &'static [&'static str] {
        match self {
            Self::Tasks => &["name", "description"],
            Self::TimeLogs => &[],
        }
    }

    #[must_use]
    pub fn has_column(self, column: &str) -> bool {
        self.columns().contains(&column)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Equality filter on a single column.
///
/// Listing is always scoped by owner; deletion targets one record by id or
/// every log of one task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    OwnerId(String),
    Id(String),
    TaskId(String),
}

impl Filter {
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::OwnerId(_) => "owner_id",
            Self::Id(_) => "id",
            Self::TaskId(_) => "task_id",
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::OwnerId(v) | Self::Id(v) | Self::TaskId(v) => v,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column(), self.value())
    }
}

// ---------------------------------------------------------------------------
// OrderBy
// ---------------------------------------------------------------------------

/// Sort key for listing a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderBy {
    pub column: &'static str,
    pub descending: bool,
}

impl OrderBy {
    #[must_use]
    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    /// SQL keyword for the direction.
    #[must_use]
    pub const fn direction(self) -> &'static str {
        if self.descending { "DESC" } else { "ASC" }
    }
}
