use taskboard_domain::BoardBackend;

use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::handlers::start_of_day;
use crate::output;

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Create {
            project_id,
            name,
            starts_on,
            ends_on,
        } => {
            let board = ctx
                .backend
                .create_board(
                    project_id,
                    name,
                    starts_on.map(start_of_day),
                    ends_on.map(start_of_day),
                )
                .await?;
            output::output_success(&board)?;
        }
        BoardAction::Show { project_id } => {
            let view = ctx.backend.get_board(project_id).await?;
            output::output_success(&view)?;
        }
    }
    Ok(())
}
