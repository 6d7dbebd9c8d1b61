use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use iim_core::health::{healthz, readyz};
use iim_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    config::list_configs,
    identifier::{get_identifier, identifier_exists, issue_identifier, process_inserted_records},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registry
        .route("/configs", get(list_configs))
        // Identifiers
        .route("/identifiers", post(issue_identifier))
        .route("/identifiers/batch", post(process_inserted_records))
        .route("/identifiers/{entity_name}/{value}", get(get_identifier))
        .route(
            "/identifiers/{entity_name}/{value}/exists",
            get(identifier_exists),
        )
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
