use anyhow::Context;
use serde::Serialize;
use tempo_core::drafts::TimeLogDraft;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogCommands;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Deleted<'a> {
    id: &'a str,
    deleted: bool,
}

/// Handle `tempo log`.
pub async fn handle(action: &LogCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let logs = ctx.facade.time_logs();
    match action {
        LogCommands::Add {
            task_id,
            hours,
            minutes,
            date,
        } => {
            let today = ctx.clock.today();
            let date = match date {
                Some(raw) => parse_date(raw, today)?,
                None => today,
            };
            let log = logs
                .create(&TimeLogDraft::new(task_id.as_str(), *hours, *minutes, date))
                .await
                .with_context(|| format!("failed to log time against {task_id}"))?;
            output(&log, flags.format)
        }
        LogCommands::List => {
            let activation = ctx.facade.activate().await;
            activation.time_logs?;
            output(&ctx.facade.log_lines(), flags.format)
        }
        LogCommands::Delete { id } => {
            logs.delete(id).await?;
            output(&Deleted { id, deleted: true }, flags.format)
        }
    }
}
