//! Error types for cache operations.

use tempo_core::errors::CoreError;
use tempo_remote::error::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// No user is signed in on the remote side.
    #[error("User not authenticated")]
    NotAuthenticated,

    /// The draft or update failed validation and was never submitted.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The task's time logs were deleted but the task itself was not.
    ///
    /// The task stays cached; deleting it again finishes the cascade.
    #[error("Deleted time logs of task {task_id} but not the task: {source}")]
    PartialCascade {
        task_id: String,
        #[source]
        source: RemoteError,
    },

    /// A remote record did not match the entity shape.
    #[error("Malformed record: {0}")]
    Decode(#[from] serde_json::Error),
}
