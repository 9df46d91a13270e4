//! Session revocation ledger
//!
//! Tracks, per user, the last instant at which all previously issued
//! tokens became invalid. Checked by the request extractor against the
//! token's `iat`.

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct SessionRevocations {
    /// user id -> revocation timestamp (seconds)
    revoked_after: DashMap<String, i64>,
}

impl SessionRevocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every token issued to `user_id` up to now
    pub fn revoke_now(&self, user_id: &str) {
        let now = chrono::Utc::now().timestamp();
        self.revoked_after.insert(user_id.to_string(), now);
        tracing::info!(user_id, "All sessions revoked for user");
    }

    /// Whether a token issued at `token_iat` has been revoked
    pub fn is_revoked(&self, user_id: &str, token_iat: i64) -> bool {
        self.revoked_after
            .get(user_id)
            .map(|revoked_at| token_iat <= *revoked_at)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_user_has_no_revocation() {
        let sessions = SessionRevocations::new();
        assert!(!sessions.is_revoked("users:u1", 0));
    }

    #[test]
    fn revoke_invalidates_older_tokens_only() {
        let sessions = SessionRevocations::new();
        let before = chrono::Utc::now().timestamp();
        sessions.revoke_now("users:u1");

        assert!(sessions.is_revoked("users:u1", before));
        assert!(!sessions.is_revoked("users:u1", before + 3600));
        assert!(!sessions.is_revoked("users:u2", before));
    }
}
