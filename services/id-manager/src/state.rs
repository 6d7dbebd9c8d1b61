use sea_orm::DatabaseConnection;

use crate::domain::hash::SourceHasher;
use crate::infra::db::{DbConfigRegistry, DbIdentifierStore, DbSequenceAllocator};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub hasher: SourceHasher,
}

impl AppState {
    pub fn config_registry(&self) -> DbConfigRegistry {
        DbConfigRegistry {
            db: self.db.clone(),
        }
    }

    pub fn sequence_allocator(&self) -> DbSequenceAllocator {
        DbSequenceAllocator {
            db: self.db.clone(),
        }
    }

    pub fn identifier_store(&self) -> DbIdentifierStore {
        DbIdentifierStore {
            db: self.db.clone(),
        }
    }
}
