use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::column::ColumnId;

pub type CardId = Uuid;
pub type UserId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignees: Vec<UserId>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(column_id: ColumnId, title: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            column_id,
            title,
            description: None,
            due_date: None,
            assignees: Vec::new(),
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_new(new: NewCard, position: i32) -> Self {
        let mut card = Self::new(new.column_id, new.title, position);
        card.description = new.description;
        card.due_date = new.due_date;
        card.assignees = new.assignees;
        card
    }

    pub fn move_to_column(&mut self, column_id: ColumnId, position: i32) {
        self.column_id = column_id;
        self.position = position;
        self.updated_at = Utc::now();
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }
}

/// Input for the add-task action. The card lands at the end of `column_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignees: Vec<UserId>,
}

impl NewCard {
    pub fn titled(column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            column_id,
            title: title.into(),
            description: None,
            due_date: None,
            assignees: Vec::new(),
        }
    }
}
