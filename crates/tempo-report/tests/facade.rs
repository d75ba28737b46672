use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use pretty_assertions::assert_eq;
use tempo_cache::{CacheError, TaskCache, TimeLogCache};
use tempo_core::clock::{Clock, FixedClock};
use tempo_core::drafts::{TaskDraft, TimeLogDraft};
use tempo_core::enums::Collection;
use tempo_core::identity::UserIdentity;
use tempo_remote::memory::{MemoryRemote, RemoteOp};
use tempo_remote::service::LibSqlRemote;
use tempo_remote::RemoteService;
use tempo_report::ReportingFacade;
use tempo_report::listing::UNKNOWN_TASK;

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-01-03T09:00:00+00:00").unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn facade<R: RemoteService>(remote: &Arc<R>) -> ReportingFacade<R> {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
    ReportingFacade::new(
        Arc::new(TaskCache::with_clock(Arc::clone(remote), Arc::clone(&clock))),
        Arc::new(TimeLogCache::with_clock(Arc::clone(remote), clock)),
    )
}

fn approx(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

#[tokio::test]
async fn writing_example_through_the_facade() {
    let remote = Arc::new(
        LibSqlRemote::new_local(":memory:", Some(UserIdentity::new("usr-1")))
            .await
            .unwrap(),
    );
    let facade = facade(&remote);

    let writing = facade
        .tasks()
        .create(&TaskDraft::new("Writing"))
        .await
        .unwrap();
    facade
        .time_logs()
        .create(&TimeLogDraft::new(&writing.id, 1, 30, day(1)))
        .await
        .unwrap();
    facade
        .time_logs()
        .create(&TimeLogDraft::new(&writing.id, 2, 0, day(2)))
        .await
        .unwrap();

    // A fresh facade over the same store sees the persisted data.
    let reloaded = self::facade(&remote);
    assert!(reloaded.activate().await.is_ok());
    let report = reloaded.report(&now());

    approx(report.total_hours, 3.5);
    approx(report.average_daily_hours, 1.8);
    assert_eq!(report.active_tasks, 1);
    let distribution: Vec<(&str, f64)> = report
        .distribution
        .iter()
        .map(|share| (share.name.as_str(), share.hours))
        .collect();
    assert_eq!(distribution, vec![("Writing", 3.5)]);
}

#[tokio::test]
async fn activation_outcomes_are_independent() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let facade = facade(&remote);
    facade.tasks().create(&TaskDraft::new("Writing")).await.unwrap();

    remote.fail_next(RemoteOp::List(Collection::TimeLogs), "timeout");
    let activation = facade.activate().await;

    assert!(activation.tasks.is_ok());
    assert!(matches!(activation.time_logs, Err(CacheError::Remote(_))));
    assert_eq!(activation.errors().count(), 1);
    assert_eq!(facade.tasks().len(), 1);
    assert!(facade.time_logs().last_error().is_some());
    assert_eq!(facade.tasks().last_error(), None);

    // Aggregation still works over whatever is cached.
    let report = facade.report(&now());
    assert_eq!(report.active_tasks, 1);
    approx(report.total_hours, 0.0);
}

#[tokio::test]
async fn report_reflects_mutations_immediately() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let facade = facade(&remote);
    let task = facade.tasks().create(&TaskDraft::new("Writing")).await.unwrap();
    let log = facade
        .time_logs()
        .create(&TimeLogDraft::new(&task.id, 1, 0, day(3)))
        .await
        .unwrap();
    approx(facade.report(&now()).total_hours, 1.0);

    facade.time_logs().delete(&log.id).await.unwrap();
    approx(facade.report(&now()).total_hours, 0.0);
}

#[tokio::test]
async fn delete_task_drops_cached_logs() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let facade = facade(&remote);
    let task = facade.tasks().create(&TaskDraft::new("Writing")).await.unwrap();
    let other = facade.tasks().create(&TaskDraft::new("Reading")).await.unwrap();
    for (task_id, d) in [(&task.id, 1), (&task.id, 2), (&other.id, 2)] {
        facade
            .time_logs()
            .create(&TimeLogDraft::new(task_id, 1, 0, day(d)))
            .await
            .unwrap();
    }

    let dropped = facade.delete_task(&task.id).await.unwrap();
    assert_eq!(dropped, 2);
    assert_eq!(facade.time_logs().len(), 1);
    assert_eq!(remote.records(Collection::TimeLogs).len(), 1);

    let report = facade.report(&now());
    assert_eq!(report.active_tasks, 1);
    approx(report.total_hours, 1.0);
}

#[tokio::test]
async fn failed_cascade_leaves_log_cache_alone() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let facade = facade(&remote);
    let task = facade.tasks().create(&TaskDraft::new("Writing")).await.unwrap();
    facade
        .time_logs()
        .create(&TimeLogDraft::new(&task.id, 1, 0, day(1)))
        .await
        .unwrap();

    remote.fail_next(RemoteOp::Delete(Collection::Tasks), "busy");
    let err = facade.delete_task(&task.id).await.unwrap_err();
    assert!(matches!(err, CacheError::PartialCascade { .. }));
    assert_eq!(facade.time_logs().len(), 1);
    assert_eq!(facade.tasks().len(), 1);
}

#[tokio::test]
async fn log_lines_name_their_tasks() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let facade = facade(&remote);
    let task = facade.tasks().create(&TaskDraft::new("Writing")).await.unwrap();
    facade
        .time_logs()
        .create(&TimeLogDraft::new(&task.id, 1, 30, day(2)))
        .await
        .unwrap();

    let lines = facade.log_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].task, "Writing");
    assert_eq!(lines[0].duration, "1h 30m");

    // A facade that loaded logs but not tasks.
    let orphaned = self::facade(&remote);
    orphaned.time_logs().fetch_all().await.unwrap();
    assert_eq!(orphaned.log_lines()[0].task, UNKNOWN_TASK);
}

#[tokio::test]
async fn watcher_reports_each_change() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let facade = facade(&remote);
    let mut watcher = facade.watch();

    let task = facade.tasks().create(&TaskDraft::new("Writing")).await.unwrap();
    let report = watcher.next(&now()).await.unwrap();
    assert_eq!(report.active_tasks, 1);

    facade
        .time_logs()
        .create(&TimeLogDraft::new(&task.id, 0, 30, day(3)))
        .await
        .unwrap();
    let report = watcher.next(&now()).await.unwrap();
    approx(report.total_hours, 0.5);
    assert_eq!(report.daily[6].minutes, 30);
}

#[tokio::test]
async fn watcher_ends_when_caches_are_dropped() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let facade = facade(&remote);
    let mut watcher = facade.watch();
    drop(facade);

    assert!(watcher.next(&now()).await.is_none());
}

#[tokio::test]
async fn watcher_ends_when_either_cache_is_dropped() {
    let remote = Arc::new(MemoryRemote::signed_in(UserIdentity::new("usr-1")));
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
    let time_logs = Arc::new(TimeLogCache::with_clock(Arc::clone(&remote), Arc::clone(&clock)));
    let facade = ReportingFacade::new(
        Arc::new(TaskCache::with_clock(Arc::clone(&remote), clock)),
        Arc::clone(&time_logs),
    );
    let task = facade.tasks().create(&TaskDraft::new("Writing")).await.unwrap();
    time_logs
        .create(&TimeLogDraft::new(&task.id, 1, 0, day(3)))
        .await
        .unwrap();
    let mut watcher = facade.watch();

    // The task cache goes away while its logs stay cached.
    drop(facade);
    assert_eq!(time_logs.len(), 1);
    assert!(watcher.next(&now()).await.is_none());
}
