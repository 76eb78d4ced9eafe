use taskboard_domain::{DragSource, DropTarget};

use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::handlers::drag;
use crate::output;

pub async fn handle(ctx: &CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Add { project_id, title } => {
            let mut session = ctx.session(project_id).await?;
            let column = session.add_column(&title).await?;
            output::output_success(&column)?;
        }
        ColumnAction::Rename { id, title } => {
            let mut session = ctx.session_for_column(id).await?;
            session.rename_column(id, &title).await?;
            output::output_success(&session.store().column(id))?;
        }
        ColumnAction::Color { id, color } => {
            let mut session = ctx.session_for_column(id).await?;
            session.set_column_color(id, color).await?;
            output::output_success(&session.store().column(id))?;
        }
        ColumnAction::Delete { id } => {
            let mut session = ctx.session_for_column(id).await?;
            session.delete_column(id).await?;
            let report = session.reconcile().await;
            output::output_success(serde_json::json!({
                "deleted": id.to_string(),
                "reconcile": report,
            }))?;
        }
        ColumnAction::Move { id, onto } => {
            let mut session = ctx.session_for_column(id).await?;
            let report = drag(
                &mut session,
                DragSource::Column(id),
                DropTarget::Column(onto),
            )
            .await?;
            output::output_success(&report)?;
        }
    }
    Ok(())
}
