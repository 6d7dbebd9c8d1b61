use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IdSequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IdSequences::SequenceName)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IdSequences::LastValue)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdSequences::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IdSequences::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IdSequences {
    Table,
    SequenceName,
    LastValue,
    CreatedAt,
}
