use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::IdManagerError;

type HmacSha256 = Hmac<Sha256>;

/// Keyed one-way digest producing deduplication keys.
///
/// The MAC is keyed once from `ID_MANAGER_SECRET` and cloned for every hash.
/// Output is the base64 (standard alphabet, padded) encoding of HMAC-SHA256.
/// There is no key rotation: a new secret yields new hashes for every value.
#[derive(Clone)]
pub struct SourceHasher {
    mac: HmacSha256,
}

impl SourceHasher {
    pub fn new(secret: &str) -> Result<Self, IdManagerError> {
        if secret.is_empty() {
            return Err(IdManagerError::InvalidConfig(
                "ID_MANAGER_SECRET must not be empty".to_owned(),
            ));
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| IdManagerError::InvalidConfig(format!("invalid hash secret: {e}")))?;
        Ok(Self { mac })
    }

    pub fn hash(&self, plain_text: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(plain_text.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for SourceHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceHasher").finish_non_exhaustive()
    }
}
