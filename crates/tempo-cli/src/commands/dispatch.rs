use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Log { action } => commands::log::handle(&action, ctx, flags).await,
        Commands::Report => commands::report::handle(ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
