use taskboard_domain::{DragSource, DropTarget, NewCard};

use crate::cli::{CardAction, CardAddArgs, CardMoveArgs};
use crate::context::CliContext;
use crate::handlers::{drag, start_of_day};
use crate::output;

pub async fn handle(ctx: &CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Add(args) => handle_add(ctx, args).await?,
        CardAction::Rename { id, title } => {
            let mut session = ctx.session_for_card(id).await?;
            session.rename_task(id, &title).await?;
            output::output_success(&session.store().card(id))?;
        }
        CardAction::Delete { id } => {
            let mut session = ctx.session_for_card(id).await?;
            session.delete_task(id).await?;
            let report = session.reconcile().await;
            output::output_success(serde_json::json!({
                "deleted": id.to_string(),
                "reconcile": report,
            }))?;
        }
        CardAction::Move(args) => handle_move(ctx, args).await?,
    }
    Ok(())
}

async fn handle_add(ctx: &CliContext, args: CardAddArgs) -> anyhow::Result<()> {
    let mut session = ctx.session_for_column(args.column_id).await?;
    let new_card = NewCard {
        column_id: args.column_id,
        title: args.title,
        description: args.description,
        due_date: args.due_date.map(start_of_day),
        assignees: args.assignees,
    };
    let card = session.add_task(new_card).await?;
    output::output_success(&card)
}

async fn handle_move(ctx: &CliContext, args: CardMoveArgs) -> anyhow::Result<()> {
    let target = match (args.onto_card, args.onto_column) {
        (Some(card_id), _) => DropTarget::Card(card_id),
        (None, Some(column_id)) => DropTarget::Column(column_id),
        (None, None) => anyhow::bail!("--onto-card or --onto-column is required"),
    };
    let mut session = ctx.session_for_card(args.id).await?;
    let report = drag(&mut session, DragSource::Card(args.id), target).await?;
    output::output_success(&report)
}
