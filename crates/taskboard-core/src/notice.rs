use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A toast-level message for the person looking at the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message.into())
    }

    /// Recoverable failures become warnings, everything else an error.
    pub fn from_error(err: &BoardError) -> Self {
        if err.is_recoverable() {
            Self::warning(err.to_string())
        } else {
            Self::error(err.to_string())
        }
    }
}

pub trait NoticeSink {
    fn push_notice(&mut self, notice: Notice);
    fn notices(&self) -> &[Notice];
}
