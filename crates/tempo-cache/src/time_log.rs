use tempo_core::entities::TimeLog;
use tempo_core::enums::{Collection, Filter};
use tempo_remote::RemoteService;
use tracing::debug;

use crate::cache::EntityCache;
use crate::error::CacheError;

/// Cache of the signed-in user's time logs, most recent date first.
///
/// Logs are immutable once created, so there is no `update`.
pub type TimeLogCache<R> = EntityCache<TimeLog, R>;

impl<R: RemoteService> EntityCache<TimeLog, R> {
    /// # Errors
    ///
    /// Returns the remote failure; the log stays cached.
    pub async fn delete(&self, id: &str) -> Result<(), CacheError> {
        self.run("delete", async {
            self.require_user().await?;
            self.remote
                .delete(Collection::TimeLogs, &Filter::Id(id.to_string()))
                .await?;

            debug!(id, "time log deleted");
            self.modify(|logs| logs.retain(|log| log.id != id));
            Ok(())
        })
        .await
    }

    /// Drop cached logs of a task whose logs were already deleted remotely.
    ///
    /// Local only; returns how many logs were dropped.
    pub fn forget_task(&self, task_id: &str) -> usize {
        let mut dropped = 0;
        self.modify(|logs| {
            let before = logs.len();
            logs.retain(|log| log.task_id != task_id);
            dropped = before - logs.len();
        });
        dropped
    }
}
