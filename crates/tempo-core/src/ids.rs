//! ID prefix constants.
//!
//! Server-assigned identifiers look like `tsk-a3f8b2c1`: a three-letter prefix,
//! a dash and eight lowercase hex characters.

pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_TIME_LOG: &str = "log";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_TASK, PREFIX_TIME_LOG];
