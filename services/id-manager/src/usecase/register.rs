use std::collections::HashMap;

use crate::domain::repository::ConfigRegistry;
use crate::domain::types::{NewIssuanceConfig, Registration, RegistrationSummary};

// ── RegisterConfigs ──────────────────────────────────────────────────────────

/// Registers the startup configuration feed. Safe to run on every boot:
/// entries that already exist are skipped.
pub struct RegisterConfigsUseCase<C: ConfigRegistry> {
    pub registry: C,
}

impl<C: ConfigRegistry> RegisterConfigsUseCase<C> {
    /// A failing entry is logged and never blocks the entries after it.
    pub async fn execute(&self, configs: &[NewIssuanceConfig]) -> RegistrationSummary {
        let mut summary = RegistrationSummary::default();
        if configs.is_empty() {
            tracing::warn!("no id generation configs supplied");
        }
        // Derived sequence name -> entity that claimed it earlier in this feed.
        let mut claimed: HashMap<String, &str> = HashMap::new();

        for config in configs {
            if let Err(reason) = config.validate() {
                tracing::error!(
                    entity_name = %config.entity_name,
                    reason = %reason,
                    "rejected id generation config"
                );
                summary.failed += 1;
                continue;
            }

            let sequence_name = config.sequence_name();
            if let Some(owner) = claimed.get(&sequence_name) {
                if *owner != config.entity_name {
                    tracing::warn!(
                        entity_name = %config.entity_name,
                        claimed_by = %owner,
                        sequence_name = %sequence_name,
                        "entity names differ only in case and share a sequence, skipping"
                    );
                    summary.failed += 1;
                    continue;
                }
            } else {
                claimed.insert(sequence_name, &config.entity_name);
            }

            match self.registry.register(config).await {
                Ok(Registration::Created(created)) => {
                    tracing::info!(
                        entity_name = %created.entity_name,
                        sequence_name = %created.sequence_name,
                        sequence_start = created.sequence_start,
                        "registered id generation config"
                    );
                    summary.created += 1;
                }
                Ok(Registration::AlreadyExists) => {
                    tracing::debug!(
                        entity_name = %config.entity_name,
                        sequence_name = %config.sequence_name(),
                        "id generation config already registered, skipping"
                    );
                    summary.existing += 1;
                }
                Err(e) => {
                    tracing::error!(
                        entity_name = %config.entity_name,
                        error = ?e,
                        "unable to register id generation config, rolled back"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            created = summary.created,
            existing = summary.existing,
            failed = summary.failed,
            "id generation config registration finished"
        );
        summary
    }
}
