use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GeneratedIdentifiers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneratedIdentifiers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GeneratedIdentifiers::SourceHash)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(GeneratedIdentifiers::GeneratedId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneratedIdentifiers::ConfigId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneratedIdentifiers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GeneratedIdentifiers::Table, GeneratedIdentifiers::ConfigId)
                            .to(IdGenerationConfig::Table, IdGenerationConfig::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GeneratedIdentifiers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GeneratedIdentifiers {
    Table,
    Id,
    SourceHash,
    GeneratedId,
    ConfigId,
    CreatedAt,
}

#[derive(Iden)]
enum IdGenerationConfig {
    Table,
    Id,
}
