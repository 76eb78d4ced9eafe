use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid gesture: {0}")]
    InvalidGesture(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Failures a board view survives: the entity vanished server-side or the
    /// call never landed. Both surface as notices instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BoardError::NotFound(_) | BoardError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classes() {
        assert!(BoardError::NotFound("Column 1".into()).is_recoverable());
        assert!(BoardError::Transport("connection reset".into()).is_recoverable());
        assert!(!BoardError::Validation("empty title".into()).is_recoverable());
        assert!(!BoardError::Internal("boom".into()).is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = BoardError::NotFound("Card abc".into());
        assert_eq!(err.to_string(), "Not found: Card abc");
    }
}
