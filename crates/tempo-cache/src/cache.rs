//! Generic remote-backed entity cache.
//!
//! `EntityCache<E, R>` mirrors the signed-in user's records of one entity
//! type. Every mutation goes to the remote service first; the in-memory list
//! only changes after the remote call succeeds. State changes are published
//! through a `tokio::sync::watch` channel so composers can react to them.
//!
//! Overlapping calls are neither queued nor coalesced. Each one applies its
//! outcome when it resolves, so the final list and `loading` flag reflect
//! whichever call finished last.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tempo_core::clock::{Clock, SystemClock};
use tempo_core::drafts::Draft;
use tempo_core::entities::Entity;
use tempo_core::enums::Filter;
use tempo_core::identity::UserIdentity;
use tempo_remote::helpers::to_record;
use tempo_remote::{Record, RemoteService};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::state::CacheState;

pub struct EntityCache<E: Entity, R> {
    pub(crate) remote: Arc<R>,
    clock: Arc<dyn Clock>,
    state: watch::Sender<CacheState<E>>,
}

pub(crate) fn decode<E: Entity>(record: Record) -> Result<E, CacheError> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

impl<E: Entity, R: RemoteService> EntityCache<E, R> {
    /// Empty cache over `remote`, dating entries with the system clock in UTC.
    pub fn new(remote: Arc<R>) -> Self {
        Self::with_clock(remote, Arc::new(SystemClock::utc()))
    }

    pub fn with_clock(remote: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(CacheState::default());
        Self {
            remote,
            clock,
            state,
        }
    }

    /// Receiver that observes every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<CacheState<E>> {
        self.state.subscribe()
    }

    /// Copy of the cached entities.
    pub fn snapshot(&self) -> Vec<E> {
        self.state.borrow().entities.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().entities.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Reload the user's full entity set, replacing the cache on success.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::NotAuthenticated` when nobody is signed in, or the
    /// remote/decode failure. The cache is left untouched on error.
    pub async fn fetch_all(&self) -> Result<(), CacheError> {
        self.run("fetch_all", async {
            let user = self.require_user().await?;
            let records = self
                .remote
                .list(E::COLLECTION, &Filter::OwnerId(user.user_id), E::ORDER_BY)
                .await?;
            let entities = records
                .into_iter()
                .map(decode)
                .collect::<Result<Vec<E>, _>>()?;

            debug!(collection = %E::COLLECTION, count = entities.len(), "cache reloaded");
            self.state.send_modify(|state| state.entities = entities);
            Ok(())
        })
        .await
    }

    /// Validate and submit `draft`, then prepend the persisted entity.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Validation` without contacting the remote service
    /// when the draft is invalid, otherwise any auth or remote failure.
    pub async fn create<D>(&self, draft: &D) -> Result<E, CacheError>
    where
        D: Draft<Entity = E>,
    {
        self.run("create", async {
            draft.validate(self.clock.today())?;
            let user = self.require_user().await?;

            let mut record = to_record(draft)?;
            record.insert("owner_id".into(), user.user_id.into());
            let created: E = decode(self.remote.insert(E::COLLECTION, record).await?)?;

            debug!(collection = %E::COLLECTION, id = created.id(), "entity created");
            self.state
                .send_modify(|state| state.entities.insert(0, created.clone()));
            Ok(created)
        })
        .await
    }

    pub(crate) async fn require_user(&self) -> Result<UserIdentity, CacheError> {
        self.remote
            .current_user()
            .await?
            .ok_or(CacheError::NotAuthenticated)
    }

    pub(crate) fn modify(&self, f: impl FnOnce(&mut Vec<E>)) {
        self.state.send_modify(|state| f(&mut state.entities));
    }

    /// Bracket one operation: raise `loading` and clear the error, then lower
    /// `loading` and record the failure message when `work` resolves.
    pub(crate) async fn run<T>(
        &self,
        op: &'static str,
        work: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = work.await;

        self.state.send_modify(|state| {
            state.loading = false;
            if let Err(e) = &result {
                state.error = Some(e.to_string());
            }
        });
        if let Err(e) = &result {
            warn!(collection = %E::COLLECTION, op, error = %e, "cache operation failed");
        }
        result
    }
}
