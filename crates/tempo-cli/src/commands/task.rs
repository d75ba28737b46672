use serde::Serialize;
use tempo_core::drafts::{TaskDraft, TaskUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Deleted<'a> {
    id: &'a str,
    deleted: bool,
}

/// Handle `tempo task`.
pub async fn handle(action: &TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tasks = ctx.facade.tasks();
    match action {
        TaskCommands::Add { name, description } => {
            let mut draft = TaskDraft::new(name.as_str());
            if let Some(description) = description {
                draft = draft.with_description(description.as_str());
            }
            let task = tasks.create(&draft).await?;
            output(&task, flags.format)
        }
        TaskCommands::List => {
            tasks.fetch_all().await?;
            output(&tasks.snapshot(), flags.format)
        }
        TaskCommands::Rename {
            id,
            name,
            description,
            clear_description,
        } => {
            let mut builder = TaskUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name.as_str());
            }
            if *clear_description {
                builder = builder.description(None);
            } else if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            let update = builder.build();
            if update.is_empty() {
                anyhow::bail!("nothing to change: pass a new name, --description or --clear-description");
            }
            let task = tasks.update(id, &update).await?;
            output(&task, flags.format)
        }
        TaskCommands::Delete { id } => {
            ctx.facade.delete_task(id).await?;
            output(&Deleted { id, deleted: true }, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::context::test_context;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            db: None,
        }
    }

    #[tokio::test]
    async fn add_rename_delete() {
        let ctx = test_context().await;
        let add = TaskCommands::Add {
            name: "Writing".into(),
            description: None,
        };
        handle(&add, &ctx, &flags()).await.unwrap();
        let id = ctx.facade.tasks().snapshot()[0].id.clone();

        let rename = TaskCommands::Rename {
            id: id.clone(),
            name: Some("Editing".into()),
            description: Some("second pass".into()),
            clear_description: false,
        };
        handle(&rename, &ctx, &flags()).await.unwrap();
        let task = &ctx.facade.tasks().snapshot()[0];
        assert_eq!(task.name, "Editing");
        assert_eq!(task.description.as_deref(), Some("second pass"));

        handle(&TaskCommands::Delete { id }, &ctx, &flags())
            .await
            .unwrap();
        assert!(ctx.facade.tasks().is_empty());
    }

    #[tokio::test]
    async fn empty_rename_is_rejected() {
        let ctx = test_context().await;
        let rename = TaskCommands::Rename {
            id: "tsk-1".into(),
            name: None,
            description: None,
            clear_description: false,
        };
        let err = handle(&rename, &ctx, &flags()).await.unwrap_err();
        assert!(err.to_string().contains("nothing to change"));
    }
}
