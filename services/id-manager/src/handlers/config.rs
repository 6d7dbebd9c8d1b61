use axum::{Json, extract::State};
use serde::Serialize;

use crate::domain::repository::ConfigRegistry;
use crate::error::IdManagerError;
use crate::state::AppState;

// ── GET /configs ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub entity_name: String,
    pub field_name: String,
    pub prefix: String,
    pub padding_length: u32,
    pub sequence_name: String,
    pub sequence_start: i64,
    #[serde(serialize_with = "iim_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_configs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConfigResponse>>, IdManagerError> {
    let configs = state.config_registry().list_all().await?;
    Ok(Json(
        configs
            .into_iter()
            .map(|config| ConfigResponse {
                entity_name: config.entity_name,
                field_name: config.source_field_name,
                prefix: config.prefix,
                padding_length: config.padding_width,
                sequence_name: config.sequence_name,
                sequence_start: config.sequence_start,
                created_at: config.created_at,
            })
            .collect(),
    ))
}
