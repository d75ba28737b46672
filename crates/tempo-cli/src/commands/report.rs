use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tempo report`.
///
/// A cache that fails to load is reported as a warning; the report covers
/// whatever did load.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let activation = ctx.facade.activate().await;
    if let (Err(tasks), Err(time_logs)) = (&activation.tasks, &activation.time_logs) {
        anyhow::bail!("failed to load tasks ({tasks}) and time logs ({time_logs})");
    }

    let report = ctx.facade.report(&ctx.clock.now());
    output(&report, flags.format)
}
