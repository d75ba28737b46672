mod log;
mod task;

pub use log::LogCommands;
pub use task::TaskCommands;
