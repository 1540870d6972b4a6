use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactInquiry::Table)
                    .if_not_exists()
                    .col(uuid(ContactInquiry::Id).primary_key())
                    .col(string_len(ContactInquiry::Name, 100).not_null())
                    .col(string_len(ContactInquiry::Email, 255).not_null())
                    .col(string_len_null(ContactInquiry::Phone, 20))
                    .col(uuid_null(ContactInquiry::ServiceId))
                    .col(text(ContactInquiry::Message).not_null())
                    .col(string_len(ContactInquiry::Status, 16).not_null().default("NEW"))
                    .col(timestamp_with_time_zone(ContactInquiry::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ContactInquiry::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inquiry_service")
                            .from(ContactInquiry::Table, ContactInquiry::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContactInquiry::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContactInquiry {
    Table,
    Id,
    Name,
    Email,
    Phone,
    ServiceId,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Service { Table, Id }
