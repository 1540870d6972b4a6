//! Categories and services: CRUD with slug generation and display ordering.

pub mod categories;
pub mod services;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::ordering::{OrderingService, SeaOrmOrderingRepository};

/// Ordering service bound to `db`.
pub(crate) fn ordering(db: &DatabaseConnection) -> OrderingService<SeaOrmOrderingRepository> {
    OrderingService::new(Arc::new(SeaOrmOrderingRepository::new(db.clone())))
}
