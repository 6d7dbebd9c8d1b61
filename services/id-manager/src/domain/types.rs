use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default minimum digit width of the numeric suffix.
pub const DEFAULT_PADDING_LENGTH: u32 = 8;

/// Default first value yielded by a freshly registered sequence.
pub const DEFAULT_SEQUENCE_START: i64 = 1;

/// Upper bound for `paddingLength`.
pub const MAX_PADDING_LENGTH: u32 = 64;

/// Suffix appended to an entity name to derive its sequence name.
pub const SEQUENCE_NAME_SUFFIX: &str = "_id_seq";

/// Issuance rules for one entity type, as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceConfig {
    pub id: i32,
    pub entity_name: String,
    pub source_field_name: String,
    pub prefix: String,
    pub padding_width: u32,
    pub sequence_name: String,
    pub sequence_start: i64,
    pub created_at: DateTime<Utc>,
}

/// One entry of the startup configuration feed (`ID_MANAGER_CONFIG`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssuanceConfig {
    pub entity_name: String,
    #[serde(rename = "fieldName")]
    pub source_field_name: String,
    pub prefix: String,
    #[serde(rename = "paddingLength", default = "default_padding_length")]
    pub padding_width: u32,
    #[serde(default = "default_sequence_start")]
    pub sequence_start: i64,
}

fn default_padding_length() -> u32 {
    DEFAULT_PADDING_LENGTH
}

fn default_sequence_start() -> i64 {
    DEFAULT_SEQUENCE_START
}

impl NewIssuanceConfig {
    /// Name of the counter backing this entity's identifiers.
    pub fn sequence_name(&self) -> String {
        sequence_name_for(&self.entity_name)
    }

    /// Returns a description of the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.entity_name.trim().is_empty() {
            return Err("entityName must not be empty".to_owned());
        }
        if self.source_field_name.trim().is_empty() {
            return Err(format!(
                "fieldName must not be empty (entity {})",
                self.entity_name
            ));
        }
        if self.padding_width > MAX_PADDING_LENGTH {
            return Err(format!(
                "paddingLength must be at most {MAX_PADDING_LENGTH} (entity {}, got {})",
                self.entity_name, self.padding_width
            ));
        }
        if self.sequence_start < 1 {
            return Err(format!(
                "sequenceStart must be positive (entity {}, got {})",
                self.entity_name, self.sequence_start
            ));
        }
        Ok(())
    }
}

/// `<lowercase entity name>_id_seq`; entity names differing only in case share a sequence name.
pub fn sequence_name_for(entity_name: &str) -> String {
    format!("{}{SEQUENCE_NAME_SUFFIX}", entity_name.to_lowercase())
}

/// Outcome of registering a single [`NewIssuanceConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Created(IssuanceConfig),
    /// A config with the same entity or sequence name was already present.
    AlreadyExists,
}

/// An identifier issued for a source hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIdentifier {
    pub id: i32,
    pub source_hash: String,
    pub generated_id: String,
    pub config_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Result of one orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedIdentifier {
    pub generated_id: String,
    /// `false` when the source value had already been issued an identifier.
    pub newly_issued: bool,
}

/// A business record committed by the submission pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRecord {
    pub entity_name: String,
    pub data: Map<String, Value>,
}

/// Counters reported after processing a post-commit batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub issued: u64,
    pub existing: u64,
    pub errored: u64,
}

/// Counters reported after registering the startup configuration feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    pub created: u64,
    pub existing: u64,
    pub failed: u64,
}

/// Text that gets hashed for a record field value.
///
/// Strings hash their raw text, other scalars their JSON text and
/// arrays/objects their compact JSON. `null` counts as absent.
///
/// Non-string values do not match hashes written by issuers that stringified
/// with JavaScript `String(value)` (`1.0` gives `"1"`, `[1,2]` gives `"1,2"`,
/// `null` gives `"null"`); such rows will not deduplicate against new ones.
pub fn hashable_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
