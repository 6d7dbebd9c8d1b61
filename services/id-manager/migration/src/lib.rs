use sea_orm_migration::prelude::*;

mod m20250601_000001_create_id_sequences;
mod m20250601_000002_create_id_generation_config;
mod m20250601_000003_create_generated_identifiers;
mod m20250601_000004_add_generated_identifiers_config_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_id_sequences::Migration),
            Box::new(m20250601_000002_create_id_generation_config::Migration),
            Box::new(m20250601_000003_create_generated_identifiers::Migration),
            Box::new(m20250601_000004_add_generated_identifiers_config_index::Migration),
        ]
    }
}
