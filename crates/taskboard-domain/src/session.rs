//! One user's live view of a board.
//!
//! Every mutation is applied to the local [`BoardStore`] first and rendered
//! from there. Position writes produced by gestures and deletions queue up and
//! are sent by [`BoardSession::reconcile`]; a failed write becomes a notice and
//! never rolls the local state back. There is no transaction around a batch,
//! so a partial failure can leave stored positions out of step with the view
//! until the next load.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use taskboard_core::{AppConfig, BoardError, BoardResult, Notice, NoticeSink};

use crate::{
    board::ProjectId,
    card::{Card, CardId, NewCard},
    column::{validate_title, Column, ColumnColor, ColumnId},
    drag::{DragEngine, DragSource, DropTarget, GestureOutcome},
    permission::{Action, PermissionGate, Resource},
    reorder::PositionWrite,
    services::BoardBackend,
    store::BoardStore,
};

#[derive(Debug, Clone, Serialize)]
pub struct FailedWrite {
    pub write: PositionWrite,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub applied: Vec<PositionWrite>,
    pub failed: Vec<FailedWrite>,
}

pub struct BoardSession {
    backend: Arc<dyn BoardBackend>,
    gate: Arc<dyn PermissionGate>,
    config: AppConfig,
    store: BoardStore,
    engine: DragEngine,
    pending: Vec<PositionWrite>,
    notices: Vec<Notice>,
}

impl BoardSession {
    pub async fn load(
        backend: Arc<dyn BoardBackend>,
        gate: Arc<dyn PermissionGate>,
        project_id: ProjectId,
        config: AppConfig,
    ) -> BoardResult<Self> {
        let view = backend.get_board(project_id).await?;
        tracing::info!(
            board_id = %view.board.id,
            columns = view.columns.len(),
            "Loaded board '{}'",
            view.board.name
        );
        Ok(Self {
            backend,
            gate,
            engine: DragEngine::new(&config),
            config,
            store: BoardStore::from_view(view),
            pending: Vec::new(),
            notices: Vec::new(),
        })
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn engine(&self) -> &DragEngine {
        &self.engine
    }

    /// Writes produced locally but not yet sent.
    pub fn pending_writes(&self) -> &[PositionWrite] {
        &self.pending
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn authorize(&self, action: Action, resource: Resource) -> BoardResult<()> {
        if self.gate.can_perform(action, resource) {
            Ok(())
        } else {
            Err(BoardError::PermissionDenied(format!(
                "{:?} on {:?}",
                action, resource
            )))
        }
    }

    /// Record a backend failure as a notice and hand it back to the caller.
    fn surface(&mut self, err: BoardError) -> BoardError {
        tracing::warn!("Board operation failed: {}", err);
        self.push_notice(Notice::from_error(&err));
        err
    }

    fn require_column(&self, id: ColumnId) -> BoardResult<&Column> {
        self.store
            .column(id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", id)))
    }

    fn require_card(&self, id: CardId) -> BoardResult<&Card> {
        self.store
            .card(id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", id)))
    }

    pub fn drag_start(&mut self, source: DragSource) -> BoardResult<Option<String>> {
        if self.config.enforce_drag_permission {
            let resource = match source {
                DragSource::Column(id) => Resource::Column(id),
                DragSource::Card(id) => Resource::Card(id),
            };
            self.authorize(Action::Reorder, resource)?;
        }
        self.engine.start(&self.store, source)
    }

    pub fn drag_over(&mut self, target: DropTarget) -> BoardResult<Option<String>> {
        self.engine.over(&mut self.store, target)
    }

    /// Apply the drop locally and queue its writes. Nothing is sent until
    /// [`reconcile`](Self::reconcile), so the next gesture can start at once.
    pub fn drag_end(&mut self, target: Option<DropTarget>) -> BoardResult<GestureOutcome> {
        let outcome = self.engine.end(&mut self.store, target)?;
        self.pending.extend(outcome.writes.iter().copied());
        Ok(outcome)
    }

    pub fn drag_cancel(&mut self) -> Option<String> {
        self.engine.cancel(&mut self.store)
    }

    /// Send every queued position write concurrently. Failures are reported
    /// and turned into notices; they never undo local state.
    pub async fn reconcile(&mut self) -> ReconcileReport {
        let writes = std::mem::take(&mut self.pending);
        if writes.is_empty() {
            return ReconcileReport::default();
        }

        let backend = self.backend.as_ref();
        let results = join_all(writes.into_iter().map(|write| async move {
            let result = persist_write(backend, write).await;
            (write, result)
        }))
        .await;

        let mut report = ReconcileReport::default();
        for (write, result) in results {
            match result {
                Ok(()) => {
                    tracing::debug!(?write, "Position persisted");
                    report.applied.push(write);
                }
                Err(err) => {
                    tracing::warn!(?write, "Failed to persist position: {}", err);
                    self.push_notice(Notice::from_error(&err));
                    report.failed.push(FailedWrite {
                        write,
                        error: err.to_string(),
                    });
                }
            }
        }
        report
    }

    pub async fn add_column(&mut self, title: &str) -> BoardResult<Column> {
        let title = validate_title("Column", title)?;
        let board_id = self.store.board().id;
        self.authorize(Action::AddColumn, Resource::Board(board_id))?;

        let result = self.backend.add_column(board_id, title).await;
        let column = result.map_err(|e| self.surface(e))?;
        let column = self.store.append_column(column).clone();
        tracing::info!(
            column_id = %column.id,
            position = column.position,
            "Added column '{}'",
            column.title
        );
        Ok(column)
    }

    pub async fn delete_column(&mut self, column_id: ColumnId) -> BoardResult<Column> {
        self.require_column(column_id)?;
        self.authorize(Action::DeleteColumn, Resource::Column(column_id))?;

        let result = self.backend.delete_column(column_id).await;
        result.map_err(|e| self.surface(e))?;
        let (column, writes) = self
            .store
            .remove_column(column_id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", column_id)))?;
        self.pending.extend(writes);
        tracing::info!(%column_id, "Deleted column '{}'", column.title);
        Ok(column)
    }

    pub async fn rename_column(&mut self, column_id: ColumnId, title: &str) -> BoardResult<()> {
        let title = validate_title("Column", title)?;
        self.require_column(column_id)?;
        self.authorize(Action::EditColumn, Resource::Column(column_id))?;

        let result = self.backend.rename_column(column_id, title.clone()).await;
        result.map_err(|e| self.surface(e))?;
        self.store.rename_column(column_id, title)
    }

    pub async fn set_column_color(
        &mut self,
        column_id: ColumnId,
        color: ColumnColor,
    ) -> BoardResult<()> {
        self.require_column(column_id)?;
        self.authorize(Action::EditColumn, Resource::Column(column_id))?;

        let result = self.backend.update_column_color(column_id, color).await;
        result.map_err(|e| self.surface(e))?;
        self.store.set_column_color(column_id, color)
    }

    /// Create a card at the end of its column. Assignee alerts are the
    /// backend's concern.
    pub async fn add_task(&mut self, mut new_card: NewCard) -> BoardResult<Card> {
        new_card.title = validate_title("Task", &new_card.title)?;
        self.require_column(new_card.column_id)?;
        if let Some(due_date) = new_card.due_date {
            self.store.board().check_due_date(due_date)?;
        }
        self.authorize(Action::AddTask, Resource::Column(new_card.column_id))?;

        let result = self.backend.add_task_card(new_card).await;
        let card = result.map_err(|e| self.surface(e))?;
        let card = self.store.append_card(card)?.clone();
        tracing::info!(
            card_id = %card.id,
            position = card.position,
            "Added task '{}'",
            card.title
        );
        Ok(card)
    }

    pub async fn delete_task(&mut self, card_id: CardId) -> BoardResult<Card> {
        self.require_card(card_id)?;
        self.authorize(Action::DeleteTask, Resource::Card(card_id))?;

        let result = self.backend.delete_task(card_id).await;
        result.map_err(|e| self.surface(e))?;
        let (card, writes) = self
            .store
            .remove_card(card_id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?;
        self.pending.extend(writes);
        tracing::info!(%card_id, "Deleted task '{}'", card.title);
        Ok(card)
    }

    pub async fn rename_task(&mut self, card_id: CardId, title: &str) -> BoardResult<()> {
        let title = validate_title("Task", title)?;
        self.require_card(card_id)?;
        self.authorize(Action::EditTask, Resource::Card(card_id))?;

        let result = self.backend.rename_task(card_id, title.clone()).await;
        result.map_err(|e| self.surface(e))?;
        self.store.rename_card(card_id, title)
    }
}

impl NoticeSink for BoardSession {
    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

async fn persist_write(backend: &dyn BoardBackend, write: PositionWrite) -> BoardResult<()> {
    match write {
        PositionWrite::Column {
            column_id,
            position,
        } => backend.set_column_position(column_id, position).await,
        PositionWrite::Card {
            card_id,
            column_id,
            position,
        } => backend.set_card_position(card_id, column_id, position).await,
    }
}
