use serde::{Deserialize, Deserializer};
use serde_json::Value;

use iim_core::config::Config;

use crate::domain::types::NewIssuanceConfig;

/// Internal ID Manager configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct IdManagerConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `ID_MANAGER_PORT`.
    #[serde(default = "default_port")]
    pub id_manager_port: u16,
    /// HMAC key used to hash source values. Env var: `ID_MANAGER_SECRET`.
    pub id_manager_secret: String,
    /// JSON array of issuance rules registered at startup. Env var: `ID_MANAGER_CONFIG`.
    #[serde(deserialize_with = "deserialize_config_list")]
    pub id_manager_config: Vec<NewIssuanceConfig>,
}

impl Config for IdManagerConfig {}

impl std::fmt::Debug for IdManagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdManagerConfig")
            .field("id_manager_port", &self.id_manager_port)
            .field("id_manager_config", &self.id_manager_config)
            .finish_non_exhaustive()
    }
}

fn default_port() -> u16 {
    3114
}

fn deserialize_config_list<'de, D>(deserializer: D) -> Result<Vec<NewIssuanceConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_config_list(&raw).map_err(serde::de::Error::custom)
}

/// Parse the `ID_MANAGER_CONFIG` JSON array.
pub fn parse_config_list(raw: &str) -> Result<Vec<NewIssuanceConfig>, String> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|_| "ID_MANAGER_CONFIG must be valid JSON".to_owned())?;
    let Value::Array(entries) = parsed else {
        return Err("ID_MANAGER_CONFIG must be a JSON array".to_owned());
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).map_err(|e| {
                format!(
                    "ID_MANAGER_CONFIG entry {index} must have entityName, fieldName and prefix as strings: {e}"
                )
            })
        })
        .collect()
}
