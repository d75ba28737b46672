//! # tempo-report
//!
//! Turns cached time logs into the statistics shown on the reports view:
//! total and average hours, a seven-day daily series, a four-week weekly
//! series and the per-task distribution.
//!
//! - [`engine`]: pure aggregation functions.
//! - [`ReportingFacade`]: loads both caches and recomputes a
//!   [`ReportSnapshot`] on demand or on every cache change.

pub mod engine;
pub mod facade;
pub mod listing;
pub mod snapshot;

pub use facade::{Activation, ReportWatcher, ReportingFacade};
pub use snapshot::{ReportSnapshot, SeriesPoint, TaskShare};
