use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Expiring set of revoked bearer tokens backing logout.
///
/// Keyed by the raw token with the token's own `exp` as eviction deadline,
/// so the set never outgrows the number of tokens still in flight. One
/// instance is constructed per application and injected where needed;
/// nothing here is process-global.
#[derive(Default)]
pub struct RevocationService {
    revoked: RwLock<HashMap<String, u64>>,
}

impl RevocationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, token: &str, expires_at: u64) {
        self.revoked
            .write()
            .expect("revocation lock poisoned")
            .insert(token.to_string(), expires_at);
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        let now = Self::now();

        let mut revoked = self.revoked.write().expect("revocation lock poisoned");
        revoked.retain(|_, expires_at| *expires_at > now);

        revoked.contains_key(token)
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoked_token_is_rejected_until_expiry() {
        let service = RevocationService::new();
        let far_future = RevocationService::now() + 3600;

        assert!(!service.is_revoked("token-a"));

        service.revoke("token-a", far_future);
        assert!(service.is_revoked("token-a"));
        assert!(!service.is_revoked("token-b"));
    }

    #[test]
    fn test_expired_entries_are_purged() {
        let service = RevocationService::new();
        let past = RevocationService::now().saturating_sub(10);

        service.revoke("stale-token", past);

        assert!(!service.is_revoked("stale-token"));
        assert!(service.revoked.read().unwrap().is_empty());
    }
}
