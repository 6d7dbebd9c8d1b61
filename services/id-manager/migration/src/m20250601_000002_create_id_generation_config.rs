use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IdGenerationConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IdGenerationConfig::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IdGenerationConfig::EntityName)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(IdGenerationConfig::FieldName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdGenerationConfig::Prefix)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdGenerationConfig::PaddingLength)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdGenerationConfig::SequenceName)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(IdGenerationConfig::SequenceStart)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdGenerationConfig::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(IdGenerationConfig::Table, IdGenerationConfig::SequenceName)
                            .to(IdSequences::Table, IdSequences::SequenceName)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IdGenerationConfig::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IdGenerationConfig {
    Table,
    Id,
    EntityName,
    FieldName,
    Prefix,
    PaddingLength,
    SequenceName,
    SequenceStart,
    CreatedAt,
}

#[derive(Iden)]
enum IdSequences {
    Table,
    SequenceName,
}
