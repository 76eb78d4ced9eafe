use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskboard_core::BoardResult;

use crate::{
    board::{Board, BoardId, BoardView, ProjectId},
    card::{Card, CardId, NewCard, UserId},
    column::{Column, ColumnColor, ColumnId},
};

/// The CRUD layer behind a board: every call is keyed by entity id and may
/// fail with `NotFound` when another session removed the entity first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardBackend: Send + Sync {
    async fn create_board(
        &self,
        project_id: ProjectId,
        name: String,
        starts_on: Option<DateTime<Utc>>,
        ends_on: Option<DateTime<Utc>>,
    ) -> BoardResult<Board>;

    /// The board with every column and every card populated.
    async fn get_board(&self, project_id: ProjectId) -> BoardResult<BoardView>;

    /// Creates a column after the board's last column.
    async fn add_column(&self, board_id: BoardId, title: String) -> BoardResult<Column>;

    /// Deletes the column and its cards.
    async fn delete_column(&self, column_id: ColumnId) -> BoardResult<()>;

    async fn rename_column(&self, column_id: ColumnId, title: String) -> BoardResult<()>;

    async fn update_column_color(&self, column_id: ColumnId, color: ColumnColor)
        -> BoardResult<()>;

    async fn set_column_position(&self, column_id: ColumnId, position: i32) -> BoardResult<()>;

    /// Creates a card at the end of its column.
    async fn add_task_card(&self, card: NewCard) -> BoardResult<Card>;

    async fn set_card_position(
        &self,
        card_id: CardId,
        column_id: ColumnId,
        position: i32,
    ) -> BoardResult<()>;

    async fn delete_task(&self, card_id: CardId) -> BoardResult<()>;

    async fn rename_task(&self, card_id: CardId, title: String) -> BoardResult<()>;
}

/// Alerts users who were assigned to a newly created card.
#[async_trait]
pub trait AssigneeNotifier: Send + Sync {
    async fn notify_assigned(&self, card: &Card, assignees: &[UserId]);
}

/// Notifier that only records the alert in the log.
pub struct TracingNotifier;

#[async_trait]
impl AssigneeNotifier for TracingNotifier {
    async fn notify_assigned(&self, card: &Card, assignees: &[UserId]) {
        for user in assignees {
            tracing::info!(
                card_id = %card.id,
                user_id = %user,
                "Assigned to task '{}'",
                card.title
            );
        }
    }
}
