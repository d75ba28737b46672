use tempo_core::drafts::TaskUpdate;
use tempo_core::entities::Task;
use tempo_core::enums::{Collection, Filter};
use tempo_remote::RemoteService;
use tempo_remote::helpers::to_record;
use tracing::debug;

use crate::cache::{EntityCache, decode};
use crate::error::CacheError;

/// Cache of the signed-in user's tasks, newest first.
pub type TaskCache<R> = EntityCache<Task, R>;

impl<R: RemoteService> EntityCache<Task, R> {
    /// Apply `update` to task `id` and replace the cached copy with the
    /// persisted result.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Validation` for a blank name, or the remote
    /// failure. The cache is left untouched on error.
    pub async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, CacheError> {
        self.run("update", async {
            update.validate()?;
            self.require_user().await?;
            let record = self
                .remote
                .update(Collection::Tasks, id, to_record(update)?)
                .await?;
            let updated: Task = decode(record)?;

            debug!(id, "task updated");
            self.modify(|tasks| {
                for task in tasks.iter_mut().filter(|task| task.id == id) {
                    *task = updated.clone();
                }
            });
            Ok(updated)
        })
        .await
    }

    /// Delete task `id` together with its time logs.
    ///
    /// Logs are removed remotely first, then the task. The task leaves the
    /// cache only once both calls succeed.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::PartialCascade` when the logs are gone but the
    /// task delete failed. Calling `delete` again completes it.
    pub async fn delete(&self, id: &str) -> Result<(), CacheError> {
        self.run("delete", async {
            self.require_user().await?;
            self.remote
                .delete(Collection::TimeLogs, &Filter::TaskId(id.to_string()))
                .await?;
            self.remote
                .delete(Collection::Tasks, &Filter::Id(id.to_string()))
                .await
                .map_err(|source| CacheError::PartialCascade {
                    task_id: id.to_string(),
                    source,
                })?;

            debug!(id, "task and its time logs deleted");
            self.modify(|tasks| tasks.retain(|task| task.id != id));
            Ok(())
        })
        .await
    }
}
