//! Auth Session Entity
//!
//! Represents an authenticated user session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::{public_id::PublicId, user_id::UserId, user_role::UserRole};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Public ID for API responses
    pub public_id: PublicId,
    /// User role at session creation
    pub role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Client fingerprint hash (User-Agent based)
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP (optional, for logging)
    pub client_ip: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        user_id: UserId,
        public_id: PublicId,
        role: UserRole,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            public_id,
            role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Sliding expiration: extend to (now + ttl) once less than half of
    /// the TTL remains.
    pub fn extend_if_needed(&mut self, ttl: Duration) {
        let now = Utc::now();

        if self.expires_at_ms < (now + (ttl / 2)).timestamp_millis() {
            self.expires_at_ms = (now + ttl).timestamp_millis();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session(ttl: Duration) -> AuthSession {
        AuthSession::new(
            UserId::new(),
            PublicId::new(),
            UserRole::Individual,
            vec![0u8; 32],
            Some("127.0.0.1".to_string()),
            Some("test-agent".to_string()),
            ttl,
        )
    }

    #[test]
    fn test_new_session_not_expired() {
        let session = sample_session(Duration::hours(12));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_expired_session() {
        let mut session = sample_session(Duration::hours(12));
        session.expires_at_ms = Utc::now().timestamp_millis() - 1_000;
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_extend_if_needed() {
        let ttl = Duration::hours(12);
        let mut session = sample_session(ttl);

        // Fresh session: more than half remains, no extension
        let before = session.expires_at_ms;
        session.extend_if_needed(ttl);
        assert_eq!(session.expires_at_ms, before);

        // Less than half remaining: extended
        session.expires_at_ms = (Utc::now() + Duration::hours(1)).timestamp_millis();
        session.extend_if_needed(ttl);
        assert!(session.expires_at_ms > (Utc::now() + Duration::hours(11)).timestamp_millis());
    }

    #[test]
    fn test_touch_updates_activity() {
        let mut session = sample_session(Duration::hours(12));
        let before = session.last_activity_at;
        session.touch();
        assert!(session.last_activity_at >= before);
    }
}
