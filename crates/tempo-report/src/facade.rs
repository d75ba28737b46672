//! Reporting facade over the task and time-log caches.
//!
//! The facade owns no aggregation state. Every report is recomputed from the
//! caches' current contents, so it always reflects the latest mutation.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tempo_cache::{CacheError, CacheState, TaskCache, TimeLogCache};
use tempo_core::entities::{Task, TimeLog};
use tempo_remote::RemoteService;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::listing::{LogLine, log_lines};
use crate::snapshot::ReportSnapshot;

/// Outcome of loading both caches. Each side succeeds or fails on its own.
#[derive(Debug)]
pub struct Activation {
    pub tasks: Result<(), CacheError>,
    pub time_logs: Result<(), CacheError>,
}

impl Activation {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.tasks.is_ok() && self.time_logs.is_ok()
    }

    pub fn errors(&self) -> impl Iterator<Item = &CacheError> {
        [self.tasks.as_ref().err(), self.time_logs.as_ref().err()]
            .into_iter()
            .flatten()
    }
}

pub struct ReportingFacade<R> {
    tasks: Arc<TaskCache<R>>,
    time_logs: Arc<TimeLogCache<R>>,
}

impl<R: RemoteService> ReportingFacade<R> {
    pub const fn new(tasks: Arc<TaskCache<R>>, time_logs: Arc<TimeLogCache<R>>) -> Self {
        Self { tasks, time_logs }
    }

    pub fn tasks(&self) -> &TaskCache<R> {
        &self.tasks
    }

    pub fn time_logs(&self) -> &TimeLogCache<R> {
        &self.time_logs
    }

    /// Load both caches concurrently.
    pub async fn activate(&self) -> Activation {
        let (tasks, time_logs) = tokio::join!(self.tasks.fetch_all(), self.time_logs.fetch_all());
        let activation = Activation { tasks, time_logs };
        for error in activation.errors() {
            warn!(%error, "cache failed to load");
        }
        debug!(
            tasks = self.tasks.len(),
            time_logs = self.time_logs.len(),
            "reporting facade activated"
        );
        activation
    }

    /// Compute every statistic from the current cache contents.
    pub fn report<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ReportSnapshot {
        ReportSnapshot::compute(&self.time_logs.snapshot(), &self.tasks.snapshot(), now)
    }

    /// Time-entry rows labelled with their task names.
    pub fn log_lines(&self) -> Vec<LogLine> {
        log_lines(&self.time_logs.snapshot(), &self.tasks.snapshot())
    }

    /// Delete a task and drop its logs from the time-log cache once the
    /// cascade has gone through remotely.
    ///
    /// Returns the number of cached logs dropped.
    ///
    /// # Errors
    ///
    /// Propagates the task cache's error; the time-log cache is left as is.
    pub async fn delete_task(&self, id: &str) -> Result<usize, CacheError> {
        self.tasks.delete(id).await?;
        Ok(self.time_logs.forget_task(id))
    }

    /// Watch both caches for changes.
    pub fn watch(&self) -> ReportWatcher {
        ReportWatcher {
            tasks: self.tasks.subscribe(),
            time_logs: self.time_logs.subscribe(),
        }
    }
}

/// Yields a fresh report whenever either cache changes.
pub struct ReportWatcher {
    tasks: watch::Receiver<CacheState<Task>>,
    time_logs: watch::Receiver<CacheState<TimeLog>>,
}

impl ReportWatcher {
    /// Wait for the next change and report on it.
    ///
    /// Returns `None` as soon as either cache is gone: a report needs both
    /// sides, so the watcher never computes one from a single cache.
    pub async fn next<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Option<ReportSnapshot> {
        let changed = tokio::select! {
            res = self.tasks.changed() => res,
            res = self.time_logs.changed() => res,
        };
        changed.ok()?;
        let tasks = self.tasks.borrow_and_update().entities.clone();
        let logs = self.time_logs.borrow_and_update().entities.clone();
        Some(ReportSnapshot::compute(&logs, &tasks, now))
    }
}
