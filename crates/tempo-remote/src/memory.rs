//! In-process remote service.
//!
//! Behaves like [`crate::service::LibSqlRemote`] (owner scoping, server-assigned
//! fields, foreign key from `time_logs.task_id` to `tasks.id`) and adds two
//! knobs per operation:
//!
//! - a queued failure, returned by the next matching call
//! - an artificial latency, awaited after the call applies and before its
//!   response is returned
//!
//! Latency makes interleavings reproducible: with two calls in flight, the
//! one with the shorter delay resolves first regardless of issue order, and a
//! slow `list` hands back the snapshot taken when it was issued.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use tempo_core::enums::{Collection, Filter, OrderBy};
use tempo_core::identity::UserIdentity;
use tracing::debug;

use crate::contract::{Record, RemoteService};
use crate::error::RemoteError;
use crate::helpers::{check_columns, check_mutable, format_timestamp};

/// A remote call, keyed by the collection it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    CurrentUser,
    List(Collection),
    Insert(Collection),
    Update(Collection),
    Delete(Collection),
}

#[derive(Default)]
struct MemoryState {
    identity: Option<UserIdentity>,
    tables: HashMap<Collection, Vec<Record>>,
    next_id: u64,
    failures: HashMap<RemoteOp, VecDeque<String>>,
    latency: HashMap<RemoteOp, Duration>,
    calls: Vec<RemoteOp>,
}

impl MemoryState {
    fn owner(&self) -> Result<String, RemoteError> {
        self.identity
            .as_ref()
            .map(|identity| identity.user_id.clone())
            .ok_or(RemoteError::Unauthenticated)
    }

    fn table(&self, collection: Collection) -> &[Record] {
        self.tables.get(&collection).map_or(&[], Vec::as_slice)
    }

    fn task_exists(&self, task_id: &str) -> bool {
        self.table(Collection::Tasks)
            .iter()
            .any(|task| field_eq(task, "id", task_id))
    }
}

#[derive(Default)]
pub struct MemoryRemote {
    state: Mutex<MemoryState>,
}

fn field_eq(record: &Record, column: &str, value: &str) -> bool {
    record.get(column).and_then(Value::as_str) == Some(value)
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

impl MemoryRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A remote with `identity` already signed in.
    #[must_use]
    pub fn signed_in(identity: UserIdentity) -> Self {
        let remote = Self::new();
        remote.sign_in(identity);
        remote
    }

    pub fn sign_in(&self, identity: UserIdentity) {
        self.state.lock().identity = Some(identity);
    }

    pub fn sign_out(&self) {
        self.state.lock().identity = None;
    }

    /// Make the next call matching `op` fail with `message`.
    ///
    /// Failures queue up; each call consumes at most one.
    pub fn fail_next(&self, op: RemoteOp, message: impl Into<String>) {
        self.state
            .lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(message.into());
    }

    /// Hold the response of every call matching `op` for `delay`.
    pub fn set_latency(&self, op: RemoteOp, delay: Duration) {
        self.state.lock().latency.insert(op, delay);
    }

    /// Every call received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<RemoteOp> {
        self.state.lock().calls.clone()
    }

    /// Raw contents of a collection across all owners, in insertion order.
    #[must_use]
    pub fn records(&self, collection: Collection) -> Vec<Record> {
        self.state.lock().table(collection).to_vec()
    }

    /// Insert a fully-formed record, bypassing identity and server fields.
    pub fn seed(&self, collection: Collection, record: Record) {
        self.state
            .lock()
            .tables
            .entry(collection)
            .or_default()
            .push(record);
    }

    /// Record the call, apply it (or its queued failure), then hold the
    /// response for the configured latency.
    async fn call<T>(
        &self,
        op: RemoteOp,
        apply: impl FnOnce(&mut MemoryState) -> Result<T, RemoteError>,
    ) -> Result<T, RemoteError> {
        let (delay, result) = {
            let mut state = self.state.lock();
            state.calls.push(op);
            let delay = state.latency.get(&op).copied();
            let result = match state.failures.get_mut(&op).and_then(VecDeque::pop_front) {
                Some(message) => {
                    debug!(?op, %message, "injected remote failure");
                    Err(RemoteError::Query(message))
                }
                None => apply(&mut state),
            };
            (delay, result)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[async_trait]
impl RemoteService for MemoryRemote {
    async fn current_user(&self) -> Result<Option<UserIdentity>, RemoteError> {
        self.call(RemoteOp::CurrentUser, |state| Ok(state.identity.clone()))
            .await
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
        order: OrderBy,
    ) -> Result<Vec<Record>, RemoteError> {
        self.call(RemoteOp::List(collection), |state| {
            let owner = state.owner()?;

            // Newest insertion first, so ties keep the order libSQL gives
            // through its created_at tie-break.
            let mut records: Vec<Record> = state
                .table(collection)
                .iter()
                .rev()
                .filter(|r| field_eq(r, filter.column(), filter.value()))
                .filter(|r| field_eq(r, "owner_id", &owner))
                .cloned()
                .collect();
            records.sort_by(|a, b| {
                let ordering = compare(a.get(order.column), b.get(order.column));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
            Ok(records)
        })
        .await
    }

    async fn insert(
        &self,
        collection: Collection,
        mut record: Record,
    ) -> Result<Record, RemoteError> {
        self.call(RemoteOp::Insert(collection), move |state| {
            check_columns(collection, &record)?;
            let owner = state.owner()?;

            if let Some(claimed) = record.get("owner_id").and_then(Value::as_str) {
                if claimed != owner {
                    return Err(RemoteError::PermissionDenied(format!(
                        "cannot insert into {collection} on behalf of {claimed}"
                    )));
                }
            }
            if collection == Collection::TimeLogs {
                let task_id = record
                    .get("task_id")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if !state.task_exists(task_id) {
                    return Err(RemoteError::Query("FOREIGN KEY constraint failed".into()));
                }
            }

            state.next_id += 1;
            let id = format!("{}-{:08x}", collection.id_prefix(), state.next_id);
            record.insert("id".into(), id.into());
            record.insert("owner_id".into(), owner.into());
            record.insert("created_at".into(), format_timestamp(Utc::now()).into());
            for column in collection.columns() {
                record.entry(*column).or_insert(Value::Null);
            }

            state
                .tables
                .entry(collection)
                .or_default()
                .push(record.clone());
            Ok(record)
        })
        .await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Record,
    ) -> Result<Record, RemoteError> {
        self.call(RemoteOp::Update(collection), move |state| {
            check_mutable(collection, &fields)?;
            let owner = state.owner()?;

            let record = state
                .tables
                .get_mut(&collection)
                .and_then(|table| {
                    table
                        .iter_mut()
                        .find(|r| field_eq(r, "id", id) && field_eq(r, "owner_id", &owner))
                })
                .ok_or(RemoteError::NoResult)?;
            for (column, value) in fields {
                record.insert(column, value);
            }
            Ok(record.clone())
        })
        .await
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), RemoteError> {
        self.call(RemoteOp::Delete(collection), |state| {
            let owner = state.owner()?;
            let doomed = |r: &Record| {
                field_eq(r, filter.column(), filter.value()) && field_eq(r, "owner_id", &owner)
            };

            if collection == Collection::Tasks {
                let orphaned = state
                    .table(Collection::Tasks)
                    .iter()
                    .filter(|task| doomed(*task))
                    .filter_map(|task| task.get("id").and_then(Value::as_str))
                    .any(|task_id| {
                        state
                            .table(Collection::TimeLogs)
                            .iter()
                            .any(|log| field_eq(log, "task_id", task_id))
                    });
                if orphaned {
                    return Err(RemoteError::Query("FOREIGN KEY constraint failed".into()));
                }
            }

            if let Some(table) = state.tables.get_mut(&collection) {
                table.retain(|r| !doomed(r));
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{from_record, to_record};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempo_core::drafts::{TaskDraft, TaskUpdateBuilder, TimeLogDraft};
    use tempo_core::entities::{Entity, Task, TimeLog};

    const OWNER: &str = "usr-mem";

    fn remote() -> MemoryRemote {
        MemoryRemote::signed_in(UserIdentity::new(OWNER))
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    async fn insert_task(remote: &MemoryRemote, name: &str) -> Task {
        let record = remote
            .insert(Collection::Tasks, to_record(&TaskDraft::new(name)).unwrap())
            .await
            .unwrap();
        from_record(record).unwrap()
    }

    #[tokio::test]
    async fn insert_and_list_round_trip() {
        let remote = remote();
        let task = insert_task(&remote, "Writing").await;
        assert!(task.id.starts_with("tsk-"));
        assert_eq!(task.owner_id, OWNER);

        let listed = remote
            .list(Collection::Tasks, &Filter::OwnerId(OWNER.into()), Task::ORDER_BY)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        let fetched: Task = from_record(listed[0].clone()).unwrap();
        assert_eq!(fetched, task);
    }

    #[tokio::test]
    async fn list_orders_logs_by_date_desc() {
        let remote = remote();
        let task = insert_task(&remote, "Writing").await;
        for d in [3, 1, 7] {
            remote
                .insert(
                    Collection::TimeLogs,
                    to_record(&TimeLogDraft::new(&task.id, 1, 0, day(d))).unwrap(),
                )
                .await
                .unwrap();
        }

        let logs: Vec<TimeLog> = remote
            .list(Collection::TimeLogs, &Filter::OwnerId(OWNER.into()), TimeLog::ORDER_BY)
            .await
            .unwrap()
            .into_iter()
            .map(|r| from_record(r).unwrap())
            .collect();
        let dates: Vec<NaiveDate> = logs.iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![day(7), day(3), day(1)]);
    }

    #[tokio::test]
    async fn injected_failure_is_consumed_once() {
        let remote = remote();
        remote.fail_next(RemoteOp::Insert(Collection::Tasks), "network down");

        let err = remote
            .insert(Collection::Tasks, to_record(&TaskDraft::new("A")).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Query failed: network down");
        assert!(remote.records(Collection::Tasks).is_empty());

        insert_task(&remote, "B").await;
        assert_eq!(remote.records(Collection::Tasks).len(), 1);
    }

    #[tokio::test]
    async fn failures_are_per_collection() {
        let remote = remote();
        remote.fail_next(RemoteOp::Delete(Collection::Tasks), "locked");

        remote
            .delete(Collection::TimeLogs, &Filter::TaskId("tsk-x".into()))
            .await
            .unwrap();
        assert!(
            remote
                .delete(Collection::Tasks, &Filter::Id("tsk-x".into()))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn foreign_key_enforced_both_ways() {
        let remote = remote();
        let orphan = remote
            .insert(
                Collection::TimeLogs,
                to_record(&TimeLogDraft::new("tsk-missing", 1, 0, day(1))).unwrap(),
            )
            .await;
        assert!(orphan.is_err());

        let task = insert_task(&remote, "Writing").await;
        remote
            .insert(
                Collection::TimeLogs,
                to_record(&TimeLogDraft::new(&task.id, 1, 0, day(1))).unwrap(),
            )
            .await
            .unwrap();
        let blocked = remote
            .delete(Collection::Tasks, &Filter::Id(task.id.clone()))
            .await;
        assert!(blocked.is_err());
    }

    #[tokio::test]
    async fn update_only_touches_owned_records() {
        let remote = remote();
        let task = insert_task(&remote, "Writing").await;

        remote.sign_in(UserIdentity::new("usr-other"));
        let update = TaskUpdateBuilder::new().name("Hijacked").build();
        let result = remote
            .update(Collection::Tasks, &task.id, to_record(&update).unwrap())
            .await;
        assert!(matches!(result, Err(RemoteError::NoResult)));
    }

    #[rstest::rstest]
    #[case("owner_id")]
    #[case("created_at")]
    #[case("hours")]
    #[tokio::test]
    async fn update_rejects_read_only_columns(#[case] column: &str) {
        let remote = remote();
        let task = insert_task(&remote, "Writing").await;
        let mut fields = Record::new();
        fields.insert(column.into(), Value::from("x"));

        let err = remote
            .update(Collection::Tasks, &task.id, fields)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::InvalidRecord(_)));
        assert_eq!(remote.records(Collection::Tasks)[0]["name"], "Writing");
    }

    #[tokio::test]
    async fn signed_out_list_fails() {
        let remote = MemoryRemote::new();
        assert_eq!(remote.current_user().await.unwrap(), None);
        let result = remote
            .list(Collection::Tasks, &Filter::OwnerId(OWNER.into()), Task::ORDER_BY)
            .await;
        assert!(matches!(result, Err(RemoteError::Unauthenticated)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_list_returns_snapshot_from_issue_time() {
        let remote = remote();
        remote.set_latency(RemoteOp::List(Collection::Tasks), Duration::from_millis(50));

        let owner = Filter::OwnerId(OWNER.into());
        let slow = remote.list(Collection::Tasks, &owner, Task::ORDER_BY);
        let fast = remote.insert(Collection::Tasks, to_record(&TaskDraft::new("Fast")).unwrap());
        let (listed, inserted) = tokio::join!(slow, fast);

        assert!(inserted.is_ok());
        assert!(listed.unwrap().is_empty(), "list was applied before the insert");
        assert_eq!(remote.records(Collection::Tasks).len(), 1);
        assert_eq!(
            remote.calls(),
            vec![RemoteOp::List(Collection::Tasks), RemoteOp::Insert(Collection::Tasks)]
        );
    }
}
