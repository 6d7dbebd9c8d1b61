use std::collections::HashMap;

use crate::domain::hash::SourceHasher;
use crate::domain::repository::{ConfigRegistry, IdentifierStore, SequenceAllocator};
use crate::domain::types::{BatchStats, IssuanceConfig, SubmittedRecord};
use crate::error::IdManagerError;
use crate::usecase::issue::{issue_with_config, report_failure};

// ── ProcessInsertedRecords ───────────────────────────────────────────────────

/// Post-commit side channel: issues identifiers for records the submission
/// pipeline has already committed. Per-record failures are logged and counted,
/// never propagated.
pub struct ProcessInsertedRecordsUseCase<C, A, S>
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

impl<C, A, S> ProcessInsertedRecordsUseCase<C, A, S>
where
    C: ConfigRegistry,
    A: SequenceAllocator,
    S: IdentifierStore,
{
    /// Fails only when the registry itself cannot be read.
    pub async fn execute(&self, records: &[SubmittedRecord]) -> Result<BatchStats, IdManagerError> {
        let configs = self.registry.list_all().await?;
        if configs.is_empty() {
            tracing::error!(
                records = records.len(),
                "no id generation configs registered, configs must be added before issuing identifiers"
            );
        }
        let by_entity: HashMap<&str, &IssuanceConfig> = configs
            .iter()
            .map(|config| (config.entity_name.as_str(), config))
            .collect();

        let mut stats = BatchStats::default();
        for record in records {
            let result = match by_entity.get(record.entity_name.as_str()) {
                Some(config) => {
                    issue_with_config(
                        &self.allocator,
                        &self.store,
                        &self.hasher,
                        config,
                        &record.data,
                    )
                    .await
                }
                None => Err(IdManagerError::ConfigNotFound {
                    entity_name: record.entity_name.clone(),
                }),
            };

            match result {
                Ok(issued) if issued.newly_issued => stats.issued += 1,
                Ok(_) => stats.existing += 1,
                Err(e) => {
                    report_failure(&record.entity_name, &e);
                    stats.errored += 1;
                }
            }
        }

        tracing::info!(
            issued = stats.issued,
            existing = stats.existing,
            errored = stats.errored,
            "processed inserted records"
        );
        Ok(stats)
    }
}
