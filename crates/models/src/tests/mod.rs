
/// Transaction handling and constraint tests
pub mod transaction_tests;

use crate::db::{connect_and_migrate, DatabaseConfig};
use sea_orm::DatabaseConnection;

/// Fresh migrated in-memory database per test.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    connect_and_migrate(&DatabaseConfig::in_memory()).await
}
