use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Internal ID Manager error variants.
#[derive(Debug, thiserror::Error)]
pub enum IdManagerError {
    #[error("no id generation config for entity '{entity_name}'")]
    ConfigNotFound { entity_name: String },
    #[error("field '{field_name}' is missing on '{entity_name}' record")]
    SourceFieldMissing {
        entity_name: String,
        field_name: String,
    },
    #[error("sequence '{sequence_name}' does not exist")]
    SequenceNotFound { sequence_name: String },
    #[error("source hash already has an identifier")]
    DuplicateSourceHash,
    #[error("identifier not found")]
    IdentifierNotFound,
    #[error("invalid id manager configuration: {0}")]
    InvalidConfig(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdManagerError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            Self::SourceFieldMissing { .. } => "SOURCE_FIELD_MISSING",
            Self::SequenceNotFound { .. } => "SEQUENCE_NOT_FOUND",
            Self::DuplicateSourceHash => "DUPLICATE_SOURCE_HASH",
            Self::IdentifierNotFound => "IDENTIFIER_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Registry/data mismatches that stop processing of a single record.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::SourceFieldMissing { .. }
                | Self::SequenceNotFound { .. }
        )
    }
}

impl IntoResponse for IdManagerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ConfigNotFound { .. } | Self::IdentifierNotFound => StatusCode::NOT_FOUND,
            Self::SourceFieldMissing { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DuplicateSourceHash => StatusCode::CONFLICT,
            Self::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            Self::SequenceNotFound { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
