use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Category listing is always sorted by display order
        manager
            .create_index(
                Index::create()
                    .name("idx_category_display_order")
                    .table(ServiceCategory::Table)
                    .col(ServiceCategory::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        // Sibling lookups for service reordering
        manager
            .create_index(
                Index::create()
                    .name("idx_service_category_order")
                    .table(Service::Table)
                    .col(Service::CategoryId)
                    .col(Service::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        // Inquiry inbox: status filter and newest-first listing
        manager
            .create_index(
                Index::create()
                    .name("idx_inquiry_status")
                    .table(ContactInquiry::Table)
                    .col(ContactInquiry::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_inquiry_created_at")
                    .table(ContactInquiry::Table)
                    .col(ContactInquiry::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_category_display_order").table(ServiceCategory::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_category_order").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_inquiry_status").table(ContactInquiry::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_inquiry_created_at").table(ContactInquiry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceCategory { Table, DisplayOrder }

#[derive(DeriveIden)]
enum Service { Table, CategoryId, DisplayOrder }

#[derive(DeriveIden)]
enum ContactInquiry { Table, Status, CreatedAt }
