use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Entity;
use crate::enums::{Collection, OrderBy};

/// A named unit of work that time is logged against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Task {
    const COLLECTION: Collection = Collection::Tasks;
    const ORDER_BY: OrderBy = OrderBy::desc("created_at");

    fn id(&self) -> &str {
        &self.id
    }
}
