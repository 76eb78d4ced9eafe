//! [`BoardBackend`] over a single JSON document on disk.
//!
//! Every call is a load-modify-save of the whole document. Calls from one
//! process are serialized by a mutex so the concurrent position writes of a
//! gesture cannot overwrite each other. Across processes the last save wins.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{BoardError, BoardResult};
use taskboard_domain::{
    AssigneeNotifier, Board, BoardBackend, BoardId, BoardView, Card, CardId, Column, ColumnColor,
    ColumnId, ColumnView, NewCard, ProjectId, TracingNotifier,
};
use tokio::sync::Mutex;

use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot, FORMAT_VERSION};

/// Everything the file holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardDocument {
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl BoardDocument {
    fn board_for_project(&self, project_id: ProjectId) -> Option<&Board> {
        self.boards.iter().find(|b| b.project_id == project_id)
    }

    fn column_mut(&mut self, id: ColumnId) -> BoardResult<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", id)))
    }

    fn card_mut(&mut self, id: CardId) -> BoardResult<&mut Card> {
        self.cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", id)))
    }

    fn project_of_board(&self, board_id: BoardId) -> BoardResult<ProjectId> {
        self.boards
            .iter()
            .find(|b| b.id == board_id)
            .map(|b| b.project_id)
            .ok_or_else(|| BoardError::NotFound(format!("Board {}", board_id)))
    }

    /// New columns and cards take the current count as their position, even
    /// when stored positions have gaps.
    fn next_column_position(&self, board_id: BoardId) -> i32 {
        self.columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .count() as i32
    }

    fn next_card_position(&self, column_id: ColumnId) -> i32 {
        self.cards
            .iter()
            .filter(|c| c.column_id == column_id)
            .count() as i32
    }

    /// Columns and cards come back in stored position order.
    fn view(&self, board: &Board) -> BoardView {
        let mut columns: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.board_id == board.id)
            .collect();
        columns.sort_by_key(|c| c.position);

        let columns = columns
            .into_iter()
            .map(|column| {
                let mut cards: Vec<Card> = self
                    .cards
                    .iter()
                    .filter(|card| card.column_id == column.id)
                    .cloned()
                    .collect();
                cards.sort_by_key(|card| card.position);
                ColumnView {
                    column: column.clone(),
                    cards,
                }
            })
            .collect();

        BoardView {
            board: board.clone(),
            columns,
        }
    }
}

pub struct FileBoardBackend<S: PersistenceStore> {
    store: S,
    lock: Mutex<()>,
    notifier: Arc<dyn AssigneeNotifier>,
}

impl<S: PersistenceStore> FileBoardBackend<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn AssigneeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn read(&self) -> BoardResult<BoardDocument> {
        if !self.store.exists().await {
            return Ok(BoardDocument::default());
        }
        let (snapshot, _) = self.store.load().await?;
        serde_json::from_slice(&snapshot.data)
            .map_err(|e| BoardError::Serialization(e.to_string()))
    }

    async fn write(&self, document: &BoardDocument) -> BoardResult<()> {
        let data =
            serde_json::to_vec(document).map_err(|e| BoardError::Serialization(e.to_string()))?;
        let snapshot = StoreSnapshot {
            data,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, self.store.instance_id()),
        };
        self.store.save(snapshot).await?;
        Ok(())
    }

    /// Load, apply `f`, save. Nothing is saved when `f` fails.
    async fn modify<T>(
        &self,
        f: impl FnOnce(&mut BoardDocument) -> BoardResult<T> + Send,
    ) -> BoardResult<T> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let out = f(&mut document)?;
        self.write(&document).await?;
        Ok(out)
    }

    pub async fn document(&self) -> BoardResult<BoardDocument> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    pub async fn project_for_column(&self, column_id: ColumnId) -> BoardResult<ProjectId> {
        let document = self.document().await?;
        let column = document
            .columns
            .iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", column_id)))?;
        document.project_of_board(column.board_id)
    }

    pub async fn project_for_card(&self, card_id: CardId) -> BoardResult<ProjectId> {
        let document = self.document().await?;
        let card = document
            .cards
            .iter()
            .find(|c| c.id == card_id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?;
        let column = document
            .columns
            .iter()
            .find(|c| c.id == card.column_id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", card.column_id)))?;
        document.project_of_board(column.board_id)
    }
}

#[async_trait]
impl<S: PersistenceStore> BoardBackend for FileBoardBackend<S> {
    async fn create_board(
        &self,
        project_id: ProjectId,
        name: String,
        starts_on: Option<DateTime<Utc>>,
        ends_on: Option<DateTime<Utc>>,
    ) -> BoardResult<Board> {
        let board = self
            .modify(|doc| {
                if doc.board_for_project(project_id).is_some() {
                    return Err(BoardError::Validation(format!(
                        "Project {} already has a board",
                        project_id
                    )));
                }
                let mut board = Board::new(project_id, name);
                board.set_timeline(starts_on, ends_on)?;
                doc.boards.push(board.clone());
                Ok(board)
            })
            .await?;
        tracing::info!(board_id = %board.id, %project_id, "Created board '{}'", board.name);
        Ok(board)
    }

    async fn get_board(&self, project_id: ProjectId) -> BoardResult<BoardView> {
        let document = self.document().await?;
        let board = document
            .board_for_project(project_id)
            .ok_or_else(|| BoardError::NotFound(format!("Board for project {}", project_id)))?;
        Ok(document.view(board))
    }

    async fn add_column(&self, board_id: BoardId, title: String) -> BoardResult<Column> {
        self.modify(|doc| {
            doc.project_of_board(board_id)?;
            let column = Column::new(board_id, title, doc.next_column_position(board_id));
            doc.columns.push(column.clone());
            Ok(column)
        })
        .await
    }

    async fn delete_column(&self, column_id: ColumnId) -> BoardResult<()> {
        self.modify(|doc| {
            doc.column_mut(column_id)?;
            doc.columns.retain(|c| c.id != column_id);
            doc.cards.retain(|c| c.column_id != column_id);
            Ok(())
        })
        .await
    }

    async fn rename_column(&self, column_id: ColumnId, title: String) -> BoardResult<()> {
        self.modify(|doc| {
            doc.column_mut(column_id)?.update_title(title);
            Ok(())
        })
        .await
    }

    async fn update_column_color(
        &self,
        column_id: ColumnId,
        color: ColumnColor,
    ) -> BoardResult<()> {
        self.modify(|doc| {
            doc.column_mut(column_id)?.set_color(color);
            Ok(())
        })
        .await
    }

    async fn set_column_position(&self, column_id: ColumnId, position: i32) -> BoardResult<()> {
        self.modify(|doc| {
            doc.column_mut(column_id)?.update_position(position);
            Ok(())
        })
        .await
    }

    async fn add_task_card(&self, new_card: NewCard) -> BoardResult<Card> {
        let card = self
            .modify(|doc| {
                doc.column_mut(new_card.column_id)?;
                let position = doc.next_card_position(new_card.column_id);
                let card = Card::from_new(new_card, position);
                doc.cards.push(card.clone());
                Ok(card)
            })
            .await?;

        if !card.assignees.is_empty() {
            self.notifier.notify_assigned(&card, &card.assignees).await;
        }
        Ok(card)
    }

    async fn set_card_position(
        &self,
        card_id: CardId,
        column_id: ColumnId,
        position: i32,
    ) -> BoardResult<()> {
        self.modify(|doc| {
            doc.column_mut(column_id)?;
            doc.card_mut(card_id)?.move_to_column(column_id, position);
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, card_id: CardId) -> BoardResult<()> {
        self.modify(|doc| {
            doc.card_mut(card_id)?;
            doc.cards.retain(|c| c.id != card_id);
            Ok(())
        })
        .await
    }

    async fn rename_task(&self, card_id: CardId, title: String) -> BoardResult<()> {
        self.modify(|doc| {
            doc.card_mut(card_id)?.update_title(title);
            Ok(())
        })
        .await
    }
}
