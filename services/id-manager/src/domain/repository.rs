#![allow(async_fn_in_trait)]

use crate::domain::types::{GeneratedIdentifier, IssuanceConfig, NewIssuanceConfig, Registration};
use crate::error::IdManagerError;

/// Durable mapping from entity type to its issuance rules.
pub trait ConfigRegistry: Send + Sync {
    /// Insert the config and its backing sequence atomically. An existing
    /// entity or sequence name yields `Registration::AlreadyExists`.
    async fn register(&self, config: &NewIssuanceConfig) -> Result<Registration, IdManagerError>;

    async fn lookup(&self, entity_name: &str) -> Result<Option<IssuanceConfig>, IdManagerError>;

    async fn list_all(&self) -> Result<Vec<IssuanceConfig>, IdManagerError>;
}

/// Named, strictly increasing counters.
pub trait SequenceAllocator: Send + Sync {
    /// Atomically advance the counter and return the new value.
    /// Unknown names fail with `IdManagerError::SequenceNotFound`.
    async fn next(&self, sequence_name: &str) -> Result<i64, IdManagerError>;
}

/// Issued identifiers keyed by source hash.
pub trait IdentifierStore: Send + Sync {
    async fn find_by_hash(
        &self,
        source_hash: &str,
    ) -> Result<Option<GeneratedIdentifier>, IdManagerError>;

    /// Insert a new row. Fails with `IdManagerError::DuplicateSourceHash` when
    /// the hash is already present; the check is the store's unique constraint.
    async fn create(
        &self,
        source_hash: &str,
        config_id: i32,
        generated_id: &str,
    ) -> Result<GeneratedIdentifier, IdManagerError>;
}
