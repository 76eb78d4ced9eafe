use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{BoardError, BoardResult};
use uuid::Uuid;

use crate::{card::Card, column::Column};

pub type BoardId = Uuid;
pub type ProjectId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub starts_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(project_id: ProjectId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            name,
            starts_on: None,
            ends_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_timeline(
        &mut self,
        starts_on: Option<DateTime<Utc>>,
        ends_on: Option<DateTime<Utc>>,
    ) -> BoardResult<()> {
        if let (Some(start), Some(end)) = (starts_on, ends_on) {
            if end < start {
                return Err(BoardError::Validation(format!(
                    "Project ends ({}) before it starts ({})",
                    end.date_naive(),
                    start.date_naive()
                )));
            }
        }
        self.starts_on = starts_on;
        self.ends_on = ends_on;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Due dates must fall inside the project timeline when one is set.
    pub fn check_due_date(&self, due_date: DateTime<Utc>) -> BoardResult<()> {
        if let Some(start) = self.starts_on {
            if due_date < start {
                return Err(BoardError::Validation(format!(
                    "Due date {} is before the project starts ({})",
                    due_date.date_naive(),
                    start.date_naive()
                )));
            }
        }
        if let Some(end) = self.ends_on {
            if due_date > end {
                return Err(BoardError::Validation(format!(
                    "Due date {} is after the project ends ({})",
                    due_date.date_naive(),
                    end.date_naive()
                )));
            }
        }
        Ok(())
    }
}

/// A column together with its cards, as returned by a board load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnView {
    #[serde(flatten)]
    pub column: Column,
    pub cards: Vec<Card>,
}

/// Fully populated board payload: the board and every column with its cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub board: Board,
    pub columns: Vec<ColumnView>,
}
