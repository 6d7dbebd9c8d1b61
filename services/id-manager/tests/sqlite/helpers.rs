use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use iim_id_manager::domain::hash::SourceHasher;
use iim_id_manager::domain::repository::ConfigRegistry;
use iim_id_manager::domain::types::NewIssuanceConfig;
use iim_id_manager::state::AppState;
use iim_migration::Migrator;

/// Fresh in-memory database with every migration applied. A single pooled
/// connection keeps the in-memory database alive and shared.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn setup_state(configs: &[NewIssuanceConfig]) -> AppState {
    let state = AppState {
        db: setup_db().await,
        hasher: SourceHasher::new("sqlite-test-secret").unwrap(),
    };
    let registry = state.config_registry();
    for config in configs {
        registry.register(config).await.unwrap();
    }
    state
}

pub fn study_config() -> NewIssuanceConfig {
    NewIssuanceConfig {
        entity_name: "study".to_owned(),
        source_field_name: "studyName".to_owned(),
        prefix: "PCGLST".to_owned(),
        padding_width: 4,
        sequence_start: 1,
    }
}

pub fn participant_config() -> NewIssuanceConfig {
    NewIssuanceConfig {
        entity_name: "participant".to_owned(),
        source_field_name: "submitterParticipantId".to_owned(),
        prefix: "PCGLPT".to_owned(),
        padding_width: 6,
        sequence_start: 500,
    }
}
