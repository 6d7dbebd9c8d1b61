use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(GeneratedIdentifiers::Table)
                    .col(GeneratedIdentifiers::ConfigId)
                    .name("idx_generated_identifiers_config_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_generated_identifiers_config_id")
                    .table(GeneratedIdentifiers::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum GeneratedIdentifiers {
    Table,
    ConfigId,
}
