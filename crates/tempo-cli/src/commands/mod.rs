pub mod dispatch;
pub mod log;
pub mod report;
pub mod schema;
pub mod shared;
pub mod task;
