use serde_json::{Map, Value};

use crate::domain::format::format_identifier;
use crate::domain::hash::SourceHasher;
use crate::domain::repository::{ConfigRegistry, IdentifierStore, SequenceAllocator};
use crate::domain::types::{IssuanceConfig, IssuedIdentifier, hashable_text};
use crate::error::IdManagerError;

// ── IssueOrLookup ────────────────────────────────────────────────────────────

/// Returns the identifier already issued for a record's source value, or mints,
/// stores and returns a new one.
pub struct IssueIdentifierUseCase<C, A, S>
where
    C: ConfigRegistry,
    A: SequenceAllocator,
    S: IdentifierStore,
{
    pub registry: C,
    pub allocator: A,
    pub store: S,
    pub hasher: SourceHasher,
}

impl<C, A, S> IssueIdentifierUseCase<C, A, S>
where
    C: ConfigRegistry,
    A: SequenceAllocator,
    S: IdentifierStore,
{
    pub async fn execute(
        &self,
        entity_name: &str,
        data: &Map<String, Value>,
    ) -> Result<IssuedIdentifier, IdManagerError> {
        let result = match self.registry.lookup(entity_name).await? {
            Some(config) => {
                issue_with_config(&self.allocator, &self.store, &self.hasher, &config, data).await
            }
            None => Err(IdManagerError::ConfigNotFound {
                entity_name: entity_name.to_owned(),
            }),
        };
        if let Err(ref e) = result {
            if e.is_configuration_error() {
                report_failure(entity_name, e);
            }
        }
        result
    }
}

/// Steps shared by single and batch issuance once the config is known.
pub(crate) async fn issue_with_config<A, S>(
    allocator: &A,
    store: &S,
    hasher: &SourceHasher,
    config: &IssuanceConfig,
    data: &Map<String, Value>,
) -> Result<IssuedIdentifier, IdManagerError>
where
    A: SequenceAllocator,
    S: IdentifierStore,
{
    let source_hash = source_hash_for(hasher, config, data)?;

    if let Some(existing) = store.find_by_hash(&source_hash).await? {
        tracing::debug!(
            entity_name = %config.entity_name,
            generated_id = %existing.generated_id,
            "source value already has an identifier"
        );
        return Ok(IssuedIdentifier {
            generated_id: existing.generated_id,
            newly_issued: false,
        });
    }

    let value = allocator.next(&config.sequence_name).await?;
    let generated_id = format_identifier(&config.prefix, value, config.padding_width);

    match store.create(&source_hash, config.id, &generated_id).await {
        Ok(created) => {
            tracing::info!(
                entity_name = %config.entity_name,
                generated_id = %created.generated_id,
                "issued identifier"
            );
            Ok(IssuedIdentifier {
                generated_id: created.generated_id,
                newly_issued: true,
            })
        }
        // A concurrent writer inserted the same hash after our probe; its
        // identifier wins and our sequence value is discarded.
        Err(IdManagerError::DuplicateSourceHash) => {
            let winner = store.find_by_hash(&source_hash).await?.ok_or_else(|| {
                anyhow::anyhow!("identifier missing after unique violation on source hash")
            })?;
            tracing::debug!(
                entity_name = %config.entity_name,
                generated_id = %winner.generated_id,
                discarded_sequence_value = value,
                "lost issuance race, returning existing identifier"
            );
            Ok(IssuedIdentifier {
                generated_id: winner.generated_id,
                newly_issued: false,
            })
        }
        Err(e) => Err(e),
    }
}

pub(crate) fn source_hash_for(
    hasher: &SourceHasher,
    config: &IssuanceConfig,
    data: &Map<String, Value>,
) -> Result<String, IdManagerError> {
    let text = data
        .get(&config.source_field_name)
        .and_then(hashable_text)
        .ok_or_else(|| IdManagerError::SourceFieldMissing {
            entity_name: config.entity_name.clone(),
            field_name: config.source_field_name.clone(),
        })?;
    Ok(hasher.hash(&text))
}

pub(crate) fn report_failure(entity_name: &str, error: &IdManagerError) {
    match error {
        IdManagerError::SourceFieldMissing { field_name, .. } => tracing::error!(
            entity_name,
            field_name = %field_name,
            kind = error.kind(),
            "identifier not issued: configured source field is missing, id manager may be misconfigured"
        ),
        IdManagerError::SequenceNotFound { sequence_name } => tracing::error!(
            entity_name,
            sequence_name = %sequence_name,
            kind = error.kind(),
            "identifier not issued: config references an unknown sequence"
        ),
        IdManagerError::ConfigNotFound { .. } => tracing::error!(
            entity_name,
            kind = error.kind(),
            "identifier not issued: no id generation config for entity"
        ),
        other => tracing::error!(
            entity_name,
            kind = other.kind(),
            error = ?other,
            "identifier not issued"
        ),
    }
}
