use clap::Subcommand;

/// Task entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task.
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List tasks, newest first.
    List,
    /// Rename a task or change its description.
    Rename {
        id: String,
        /// New name.
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete a task and all of its time logs.
    Delete { id: String },
}
