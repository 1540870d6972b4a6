//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_admin_user;
mod m20240101_000002_create_service_category;
mod m20240101_000003_create_service;
mod m20240101_000004_create_contact_inquiry;
mod m20240101_000005_create_site_settings;
mod m20240101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_admin_user::Migration),
            Box::new(m20240101_000002_create_service_category::Migration),
            Box::new(m20240101_000003_create_service::Migration),
            Box::new(m20240101_000004_create_contact_inquiry::Migration),
            Box::new(m20240101_000005_create_site_settings::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000006_add_indexes::Migration),
        ]
    }
}
