use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{LogCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Time logs.
    Log {
        #[command(subcommand)]
        action: LogCommands,
    },
    /// Totals, daily and weekly series, and per-task distribution.
    Report,
    /// Dump JSON schema for an output type.
    Schema(SchemaArgs),
}

/// Arguments for `tempo schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Task,
    TimeLog,
    LogLine,
    Report,
}
