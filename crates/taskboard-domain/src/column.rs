use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{BoardError, BoardResult};
use uuid::Uuid;

use crate::board::BoardId;

pub type ColumnId = Uuid;

/// Cosmetic tag rendered as the column header accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnColor {
    #[default]
    Slate,
    Red,
    Orange,
    Amber,
    Green,
    Teal,
    Blue,
    Violet,
    Pink,
}

impl ColumnColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slate => "slate",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Pink => "pink",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "slate" => Some(Self::Slate),
            "red" => Some(Self::Red),
            "orange" => Some(Self::Orange),
            "amber" => Some(Self::Amber),
            "green" => Some(Self::Green),
            "teal" => Some(Self::Teal),
            "blue" => Some(Self::Blue),
            "violet" => Some(Self::Violet),
            "pink" => Some(Self::Pink),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub title: String,
    #[serde(default)]
    pub color: ColumnColor,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    pub fn new(board_id: BoardId, title: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            title,
            color: ColumnColor::default(),
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    pub fn set_color(&mut self, color: ColumnColor) {
        self.color = color;
        self.updated_at = Utc::now();
    }

    pub fn update_position(&mut self, position: i32) {
        self.position = position;
        self.updated_at = Utc::now();
    }
}

/// Trims a user-entered title and rejects it when nothing is left.
pub fn validate_title(kind: &str, title: &str) -> BoardResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::Validation(format!(
            "{} title cannot be empty",
            kind
        )));
    }
    Ok(trimmed.to_string())
}
