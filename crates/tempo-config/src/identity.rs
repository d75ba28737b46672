//! Signed-in user configuration.
//!
//! Auth bootstrap lives outside Tempo; the CLI signs in whatever identity is
//! configured here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// User every task and log is scoped to.
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub email: String,
}

impl IdentityConfig {
    pub fn is_configured(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}
