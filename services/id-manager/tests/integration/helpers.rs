use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::Barrier;

use iim_id_manager::domain::hash::SourceHasher;
use iim_id_manager::domain::repository::{ConfigRegistry, IdentifierStore, SequenceAllocator};
use iim_id_manager::domain::types::{
    GeneratedIdentifier, IssuanceConfig, NewIssuanceConfig, Registration,
};
use iim_id_manager::error::IdManagerError;
use iim_id_manager::usecase::batch::ProcessInsertedRecordsUseCase;
use iim_id_manager::usecase::issue::IssueIdentifierUseCase;
use iim_id_manager::usecase::lookup::FindIdentifierUseCase;
use iim_id_manager::usecase::register::RegisterConfigsUseCase;

// ── MockDb ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockState {
    pub configs: Vec<IssuanceConfig>,
    /// Last allocated value per sequence name.
    pub sequences: HashMap<String, i64>,
    pub identifiers: Vec<GeneratedIdentifier>,
    pub lookup_calls: usize,
    pub list_all_calls: usize,
    /// Entities whose registration fails with a datastore error.
    pub failing_entities: Vec<String>,
    pub fail_creates: bool,
    /// Number of upcoming `find_by_hash` calls that park on `race_barrier`.
    pub barrier_waits: usize,
    pub race_barrier: Option<Arc<Barrier>>,
}

/// In-memory stand-in for the three tables. Implements every repository
/// trait; clones share state.
#[derive(Clone, Default)]
pub struct MockDb {
    pub state: Arc<Mutex<MockState>>,
}

impl MockDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the given configs and their sequences.
    pub fn with_configs(configs: &[NewIssuanceConfig]) -> Self {
        let db = Self::new();
        {
            let mut state = db.state.lock().unwrap();
            for config in configs {
                insert_config(&mut state, config);
            }
        }
        db
    }

    /// Force the next `n` hash probes to wait for each other, so that `n`
    /// concurrent issuances all observe a miss before any of them inserts.
    pub fn force_race(&self, n: usize) {
        let mut state = self.state.lock().unwrap();
        state.barrier_waits = n;
        state.race_barrier = Some(Arc::new(Barrier::new(n)));
    }

    pub fn identifier_count(&self) -> usize {
        self.state.lock().unwrap().identifiers.len()
    }

    pub fn config_count(&self) -> usize {
        self.state.lock().unwrap().configs.len()
    }

    pub fn sequence_value(&self, sequence_name: &str) -> Option<i64> {
        self.state.lock().unwrap().sequences.get(sequence_name).copied()
    }

    pub fn remove_sequence(&self, sequence_name: &str) {
        self.state.lock().unwrap().sequences.remove(sequence_name);
    }
}

fn insert_config(state: &mut MockState, config: &NewIssuanceConfig) -> IssuanceConfig {
    let created = IssuanceConfig {
        id: state.configs.len() as i32 + 1,
        entity_name: config.entity_name.clone(),
        source_field_name: config.source_field_name.clone(),
        prefix: config.prefix.clone(),
        padding_width: config.padding_width,
        sequence_name: config.sequence_name(),
        sequence_start: config.sequence_start,
        created_at: Utc::now(),
    };
    state
        .sequences
        .insert(created.sequence_name.clone(), config.sequence_start - 1);
    state.configs.push(created.clone());
    created
}

impl ConfigRegistry for MockDb {
    async fn register(&self, config: &NewIssuanceConfig) -> Result<Registration, IdManagerError> {
        let mut state = self.state.lock().unwrap();
        if state.failing_entities.contains(&config.entity_name) {
            return Err(anyhow::anyhow!("connection reset").into());
        }
        let sequence_name = config.sequence_name();
        let exists = state.configs.iter().any(|c| {
            c.entity_name == config.entity_name || c.sequence_name == sequence_name
        }) || state.sequences.contains_key(&sequence_name);
        if exists {
            return Ok(Registration::AlreadyExists);
        }
        Ok(Registration::Created(insert_config(&mut state, config)))
    }

    async fn lookup(&self, entity_name: &str) -> Result<Option<IssuanceConfig>, IdManagerError> {
        let mut state = self.state.lock().unwrap();
        state.lookup_calls += 1;
        Ok(state
            .configs
            .iter()
            .find(|c| c.entity_name == entity_name)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<IssuanceConfig>, IdManagerError> {
        let mut state = self.state.lock().unwrap();
        state.list_all_calls += 1;
        Ok(state.configs.clone())
    }
}

impl SequenceAllocator for MockDb {
    async fn next(&self, sequence_name: &str) -> Result<i64, IdManagerError> {
        let mut state = self.state.lock().unwrap();
        let value = state.sequences.get_mut(sequence_name).ok_or_else(|| {
            IdManagerError::SequenceNotFound {
                sequence_name: sequence_name.to_owned(),
            }
        })?;
        *value += 1;
        Ok(*value)
    }
}

impl IdentifierStore for MockDb {
    async fn find_by_hash(
        &self,
        source_hash: &str,
    ) -> Result<Option<GeneratedIdentifier>, IdManagerError> {
        let (found, barrier) = {
            let mut state = self.state.lock().unwrap();
            let found = state
                .identifiers
                .iter()
                .find(|i| i.source_hash == source_hash)
                .cloned();
            let barrier = if state.barrier_waits > 0 {
                state.barrier_waits -= 1;
                state.race_barrier.clone()
            } else {
                None
            };
            (found, barrier)
        };
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        Ok(found)
    }

    async fn create(
        &self,
        source_hash: &str,
        config_id: i32,
        generated_id: &str,
    ) -> Result<GeneratedIdentifier, IdManagerError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_creates {
            return Err(anyhow::anyhow!("connection timed out").into());
        }
        if state.identifiers.iter().any(|i| i.source_hash == source_hash) {
            return Err(IdManagerError::DuplicateSourceHash);
        }
        let created = GeneratedIdentifier {
            id: state.identifiers.len() as i32 + 1,
            source_hash: source_hash.to_owned(),
            generated_id: generated_id.to_owned(),
            config_id,
            created_at: Utc::now(),
        };
        state.identifiers.push(created.clone());
        Ok(created)
    }
}

// ── Use case builders ────────────────────────────────────────────────────────

pub const TEST_SECRET: &str = "test-id-manager-secret";

pub fn hasher() -> SourceHasher {
    SourceHasher::new(TEST_SECRET).unwrap()
}

pub fn issue_usecase(db: &MockDb) -> IssueIdentifierUseCase<MockDb, MockDb, MockDb> {
    IssueIdentifierUseCase {
        registry: db.clone(),
        allocator: db.clone(),
        store: db.clone(),
        hasher: hasher(),
    }
}

pub fn batch_usecase(db: &MockDb) -> ProcessInsertedRecordsUseCase<MockDb, MockDb, MockDb> {
    ProcessInsertedRecordsUseCase {
        registry: db.clone(),
        allocator: db.clone(),
        store: db.clone(),
        hasher: hasher(),
    }
}

pub fn find_usecase(db: &MockDb) -> FindIdentifierUseCase<MockDb, MockDb> {
    FindIdentifierUseCase {
        registry: db.clone(),
        store: db.clone(),
        hasher: hasher(),
    }
}

pub fn register_usecase(db: &MockDb) -> RegisterConfigsUseCase<MockDb> {
    RegisterConfigsUseCase {
        registry: db.clone(),
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn study_config() -> NewIssuanceConfig {
    NewIssuanceConfig {
        entity_name: "study".to_owned(),
        source_field_name: "studyName".to_owned(),
        prefix: "PCGLST".to_owned(),
        padding_width: 4,
        sequence_start: 1,
    }
}

pub fn participant_config() -> NewIssuanceConfig {
    NewIssuanceConfig {
        entity_name: "participant".to_owned(),
        source_field_name: "submitterParticipantId".to_owned(),
        prefix: "PCGLPT".to_owned(),
        padding_width: 6,
        sequence_start: 100,
    }
}

pub fn record(field: &str, value: Value) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert(field.to_owned(), value);
    data
}

pub fn study(name: &str) -> Map<String, Value> {
    record("studyName", Value::String(name.to_owned()))
}
