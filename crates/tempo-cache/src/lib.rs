//! # tempo-cache
//!
//! In-memory mirrors of the signed-in user's tasks and time logs, backed by a
//! [`tempo_remote::RemoteService`].
//!
//! [`EntityCache`] carries the shared behaviour (full reload, create with
//! validation, loading/error tracking). [`TaskCache`] adds update and a
//! cascading delete; [`TimeLogCache`] adds a plain delete.

pub mod cache;
pub mod error;
pub mod state;
mod task;
mod time_log;

pub use cache::EntityCache;
pub use error::CacheError;
pub use state::CacheState;
pub use task::TaskCache;
pub use time_log::TimeLogCache;
