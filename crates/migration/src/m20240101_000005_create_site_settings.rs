//! Create `site_settings` table. A single row keyed `singleton` is expected.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteSettings::Table)
                    .if_not_exists()
                    .col(string_len(SiteSettings::Id, 32).primary_key())
                    .col(double(SiteSettings::ServiceAreaLat).not_null())
                    .col(double(SiteSettings::ServiceAreaLng).not_null())
                    .col(integer(SiteSettings::ServiceAreaMiles).not_null())
                    .col(string_len(SiteSettings::CompanyName, 100).not_null())
                    .col(string_len(SiteSettings::CompanyPhone, 20).not_null())
                    .col(string_len(SiteSettings::CompanyEmail, 255).not_null())
                    .col(string_len_null(SiteSettings::CompanyAddress, 500))
                    .col(timestamp_with_time_zone(SiteSettings::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SiteSettings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SiteSettings {
    Table,
    Id,
    ServiceAreaLat,
    ServiceAreaLng,
    ServiceAreaMiles,
    CompanyName,
    CompanyPhone,
    CompanyEmail,
    CompanyAddress,
    UpdatedAt,
}
