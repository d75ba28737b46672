use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity.
///
/// Produced by whatever auth layer signs the user in and handed to the remote
/// service. Contains only data fields, no auth logic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserIdentity {
    /// Stable user identifier; every task and time log is scoped to it.
    pub user_id: String,
    pub email: Option<String>,
}

impl UserIdentity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }
}
