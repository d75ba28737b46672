//! Entity structs for the Tempo domain.
//!
//! Each entity maps to one remote collection. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` so they can travel as remote records and be
//! validated against their schema.

mod task;
mod time_log;

pub use task::Task;
pub use time_log::TimeLog;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::enums::{Collection, OrderBy};

/// A record type mirrored by an entity cache.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Remote collection holding this entity.
    const COLLECTION: Collection;

    /// Ordering applied when the full set is fetched.
    const ORDER_BY: OrderBy;

    /// Server-assigned identifier.
    fn id(&self) -> &str;
}
