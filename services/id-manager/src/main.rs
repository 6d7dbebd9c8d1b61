use sea_orm::Database;
use tracing::info;

use iim_core::config::Config;
use iim_core::tracing::init_tracing;

use iim_id_manager::config::IdManagerConfig;
use iim_id_manager::domain::hash::SourceHasher;
use iim_id_manager::router::build_router;
use iim_id_manager::state::AppState;
use iim_id_manager::usecase::register::RegisterConfigsUseCase;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = IdManagerConfig::from_env();
    let hasher = SourceHasher::new(&config.id_manager_secret).expect("invalid ID_MANAGER_SECRET");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db, hasher };

    RegisterConfigsUseCase {
        registry: state.config_registry(),
    }
    .execute(&config.id_manager_config)
    .await;

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.id_manager_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("id manager listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
