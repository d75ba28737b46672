use clap::Subcommand;

/// Time log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LogCommands {
    /// Log time against a task.
    Add {
        task_id: String,
        #[arg(long, default_value_t = 0)]
        hours: u32,
        #[arg(long, default_value_t = 0)]
        minutes: u32,
        /// YYYY-MM-DD, `today` or `yesterday` (defaults to today).
        #[arg(long)]
        date: Option<String>,
    },
    /// List time logs, most recent date first.
    List,
    /// Delete a time log.
    Delete { id: String },
}
