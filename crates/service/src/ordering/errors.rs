use thiserror::Error;

use super::domain::{Direction, EntityKind};

/// Errors raised while moving or placing orderable rows.
#[derive(Debug, Error)]
pub enum OrderingError {
    #[error("{} not found", .0.label())]
    NotFound(EntityKind),
    #[error("Invalid direction")]
    InvalidDirection(String),
    #[error("{} is already at the {}", kind.label(), direction.boundary())]
    AlreadyAtBoundary { kind: EntityKind, direction: Direction },
    #[error("repository error: {0}")]
    Repository(String),
    #[error("transaction error: {0}")]
    Transaction(String),
}

impl OrderingError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            OrderingError::NotFound(_) => 2001,
            OrderingError::InvalidDirection(_) => 2002,
            OrderingError::AlreadyAtBoundary { .. } => 2003,
            OrderingError::Repository(_) => 2100,
            OrderingError::Transaction(_) => 2101,
        }
    }

    /// True for failures caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OrderingError::NotFound(_) | OrderingError::InvalidDirection(_) | OrderingError::AlreadyAtBoundary { .. }
        )
    }
}

impl From<sea_orm::DbErr> for OrderingError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Repository(e.to_string()) }
}
