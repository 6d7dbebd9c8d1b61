use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{BatchStats, IssuedIdentifier, SubmittedRecord};
use crate::error::IdManagerError;
use crate::infra::db::{DbConfigRegistry, DbIdentifierStore};
use crate::state::AppState;
use crate::usecase::batch::ProcessInsertedRecordsUseCase;
use crate::usecase::issue::IssueIdentifierUseCase;
use crate::usecase::lookup::FindIdentifierUseCase;

// ── POST /identifiers ────────────────────────────────────────────────────────

pub async fn issue_identifier(
    State(state): State<AppState>,
    Json(body): Json<SubmittedRecord>,
) -> Result<(StatusCode, Json<IssuedIdentifier>), IdManagerError> {
    let usecase = IssueIdentifierUseCase {
        registry: state.config_registry(),
        allocator: state.sequence_allocator(),
        store: state.identifier_store(),
        hasher: state.hasher.clone(),
    };
    let issued = usecase.execute(&body.entity_name, &body.data).await?;
    let status = if issued.newly_issued {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(issued)))
}

// ── POST /identifiers/batch ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct InsertedRecordsRequest {
    pub inserts: Vec<SubmittedRecord>,
}

pub async fn process_inserted_records(
    State(state): State<AppState>,
    Json(body): Json<InsertedRecordsRequest>,
) -> Result<Json<BatchStats>, IdManagerError> {
    let usecase = ProcessInsertedRecordsUseCase {
        registry: state.config_registry(),
        allocator: state.sequence_allocator(),
        store: state.identifier_store(),
        hasher: state.hasher.clone(),
    };
    let stats = usecase.execute(&body.inserts).await?;
    Ok(Json(stats))
}

// ── GET /identifiers/{entity_name}/{value} ───────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierResponse {
    pub entity_name: String,
    pub generated_id: String,
    #[serde(serialize_with = "iim_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_identifier(
    State(state): State<AppState>,
    Path((entity_name, value)): Path<(String, String)>,
) -> Result<Json<IdentifierResponse>, IdManagerError> {
    let identifier = find_usecase(&state)
        .execute(&entity_name, &value)
        .await?
        .ok_or(IdManagerError::IdentifierNotFound)?;
    Ok(Json(IdentifierResponse {
        entity_name,
        generated_id: identifier.generated_id,
        created_at: identifier.created_at,
    }))
}

// ── GET /identifiers/{entity_name}/{value}/exists ────────────────────────────

pub async fn identifier_exists(
    State(state): State<AppState>,
    Path((entity_name, value)): Path<(String, String)>,
) -> Result<Json<bool>, IdManagerError> {
    let exists = find_usecase(&state).exists(&entity_name, &value).await?;
    Ok(Json(exists))
}

fn find_usecase(state: &AppState) -> FindIdentifierUseCase<DbConfigRegistry, DbIdentifierStore> {
    FindIdentifierUseCase {
        registry: state.config_registry(),
        store: state.identifier_store(),
        hasher: state.hasher.clone(),
    }
}
