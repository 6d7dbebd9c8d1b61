use crate::domain::hash::SourceHasher;
use crate::domain::repository::{ConfigRegistry, IdentifierStore};
use crate::domain::types::GeneratedIdentifier;
use crate::error::IdManagerError;

// ── FindIdentifier / Exists ──────────────────────────────────────────────────

/// Read-only probe: never allocates a sequence value or writes a row.
pub struct FindIdentifierUseCase<C: ConfigRegistry, S: IdentifierStore> {
    pub registry: C,
    pub store: S,
    pub hasher: SourceHasher,
}

impl<C: ConfigRegistry, S: IdentifierStore> FindIdentifierUseCase<C, S> {
    /// Identifier issued under `entity_name`'s config for `field_value`.
    /// A hash issued under another entity's config does not match.
    pub async fn execute(
        &self,
        entity_name: &str,
        field_value: &str,
    ) -> Result<Option<GeneratedIdentifier>, IdManagerError> {
        let config = self.registry.lookup(entity_name).await?.ok_or_else(|| {
            IdManagerError::ConfigNotFound {
                entity_name: entity_name.to_owned(),
            }
        })?;
        let source_hash = self.hasher.hash(field_value);
        let found = self.store.find_by_hash(&source_hash).await?;
        Ok(found.filter(|identifier| identifier.config_id == config.id))
    }

    pub async fn exists(
        &self,
        entity_name: &str,
        field_value: &str,
    ) -> Result<bool, IdManagerError> {
        Ok(self.execute(entity_name, field_value).await?.is_some())
    }
}
