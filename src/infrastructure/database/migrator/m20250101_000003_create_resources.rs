//! Create resources table
//!
//! Rentable vehicles, each owned by a resource group and priced per day.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_resource_groups::ResourceGroups;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::GroupId).integer().not_null())
                    .col(ColumnDef::new(Resources::Make).string().not_null())
                    .col(ColumnDef::new(Resources::Model).string().not_null())
                    .col(ColumnDef::new(Resources::Year).integer().not_null())
                    .col(ColumnDef::new(Resources::Color).string().not_null())
                    .col(
                        ColumnDef::new(Resources::RegistrationNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Resources::DailyRate)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resources_group")
                            .from(Resources::Table, Resources::GroupId)
                            .to(ResourceGroups::Table, ResourceGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_group")
                    .table(Resources::Table)
                    .col(Resources::GroupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Resources {
    Table,
    Id,
    GroupId,
    Make,
    Model,
    Year,
    Color,
    RegistrationNo,
    DailyRate,
    CreatedAt,
    UpdatedAt,
}
