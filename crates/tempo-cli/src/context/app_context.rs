use std::sync::Arc;

use anyhow::Context;
use tempo_cache::{TaskCache, TimeLogCache};
use tempo_config::{StoreConfig, TempoConfig};
use tempo_core::clock::{Clock, SystemClock};
use tempo_core::identity::UserIdentity;
use tempo_remote::service::LibSqlRemote;
use tempo_report::ReportingFacade;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub facade: ReportingFacade<LibSqlRemote>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Open the store and build both caches behind the reporting facade.
    ///
    /// `db_override` takes precedence over `store.path`.
    pub async fn init(config: &TempoConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        let store = StoreConfig {
            path: db_override.map_or_else(|| config.store.path.clone(), str::to_string),
        };
        if let Some(dir) = store.parent_dir() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let identity = signed_in_identity(config);
        if identity.is_none() {
            tracing::debug!("no identity configured; remote calls will be rejected");
        }

        let remote = Arc::new(
            LibSqlRemote::new_local(&store.path, identity)
                .await
                .with_context(|| format!("failed to open tempo store at {}", store.path))?,
        );
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.report.offset()?));

        let facade = ReportingFacade::new(
            Arc::new(TaskCache::with_clock(Arc::clone(&remote), Arc::clone(&clock))),
            Arc::new(TimeLogCache::with_clock(remote, Arc::clone(&clock))),
        );

        Ok(Self { facade, clock })
    }
}

fn signed_in_identity(config: &TempoConfig) -> Option<UserIdentity> {
    let identity = config.require_identity().ok()?;
    let email = identity.email.trim();
    Some(UserIdentity {
        user_id: identity.user_id.trim().to_string(),
        email: (!email.is_empty()).then(|| email.to_string()),
    })
}

/// In-memory context signed in as `usr-test`, for command tests.
#[cfg(test)]
pub async fn test_context() -> AppContext {
    let config = TempoConfig {
        identity: tempo_config::IdentityConfig {
            user_id: "usr-test".into(),
            email: String::new(),
        },
        ..TempoConfig::default()
    };
    AppContext::init(&config, Some(":memory:")).await.unwrap()
}
