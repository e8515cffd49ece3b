//! Credentials Entity
//!
//! Authentication credentials for a user.
//! Separated from User entity to isolate sensitive data.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{
    one_time_code::OneTimeCode, user_id::UserId, user_password::UserPassword,
};

/// Credentials entity
///
/// Contains sensitive authentication data:
/// - Password hash
/// - Active one-time code (account activation / password reset)
/// - Login failure tracking
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Reference to User
    pub user_id: UserId,
    /// Hashed password
    pub password_hash: UserPassword,
    /// Active one-time code, if one was issued
    pub one_time_code: Option<OneTimeCode>,
    /// When the active code was issued
    pub code_issued_at: Option<DateTime<Utc>>,
    /// Consecutive login failure count
    pub login_failed_count: u16,
    /// Last login failure time
    pub last_failed_at: Option<DateTime<Utc>>,
    /// Account locked until (temporary lockout after failures)
    pub locked_until: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credentials {
    /// Maximum login failures before temporary lockout
    pub const MAX_LOGIN_FAILURES: u16 = 5;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 15;

    /// Create new credentials
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password_hash,
            one_time_code: None,
            code_issued_at: None,
            login_failed_count: 0,
            last_failed_at: None,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if account is currently locked
    pub fn is_locked(&self) -> bool {
        if let Some(locked_until) = self.locked_until {
            Utc::now() < locked_until
        } else {
            false
        }
    }

    /// Record a failed login attempt
    pub fn record_failure(&mut self) {
        let now = Utc::now();
        self.login_failed_count += 1;
        self.last_failed_at = Some(now);
        self.updated_at = now;

        // Lock account after too many failures
        if self.login_failed_count >= Self::MAX_LOGIN_FAILURES {
            self.locked_until = Some(now + Duration::minutes(Self::LOCKOUT_MINUTES));
        }
    }

    /// Reset login failure count on successful login
    pub fn reset_failures(&mut self) {
        self.login_failed_count = 0;
        self.last_failed_at = None;
        self.locked_until = None;
        self.updated_at = Utc::now();
    }

    /// Issue a fresh one-time code, replacing any previous one
    pub fn issue_code(&mut self) -> OneTimeCode {
        let code = OneTimeCode::generate();
        let now = Utc::now();
        self.one_time_code = Some(code.clone());
        self.code_issued_at = Some(now);
        self.updated_at = now;
        code
    }

    /// Clear the active one-time code
    pub fn clear_code(&mut self) {
        self.one_time_code = None;
        self.code_issued_at = None;
        self.updated_at = Utc::now();
    }

    /// Verify a candidate code against the active one
    ///
    /// Returns false when no code is active, the code has expired, or
    /// the candidate does not match.
    pub fn verify_code(&self, candidate: &str, ttl: Duration) -> bool {
        let (Some(code), Some(issued_at)) = (&self.one_time_code, self.code_issued_at) else {
            return false;
        };

        if Utc::now() - issued_at > ttl {
            return false;
        }

        code.matches(candidate)
    }

    /// Update password
    pub fn update_password(&mut self, new_password: UserPassword) {
        self.password_hash = new_password;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};

    fn sample_credentials() -> Credentials {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        Credentials::new(UserId::new(), hash)
    }

    #[test]
    fn test_lockout_after_max_failures() {
        let mut creds = sample_credentials();
        assert!(!creds.is_locked());

        for _ in 0..Credentials::MAX_LOGIN_FAILURES {
            creds.record_failure();
        }
        assert!(creds.is_locked());

        creds.reset_failures();
        assert!(!creds.is_locked());
        assert_eq!(creds.login_failed_count, 0);
    }

    #[test]
    fn test_issue_and_verify_code() {
        let mut creds = sample_credentials();
        assert!(!creds.verify_code("0000", Duration::minutes(10)));

        let code = creds.issue_code();
        assert!(creds.verify_code(code.as_str(), Duration::minutes(10)));
        assert!(!creds.verify_code("wrong", Duration::minutes(10)));

        creds.clear_code();
        assert!(!creds.verify_code(code.as_str(), Duration::minutes(10)));
    }

    #[test]
    fn test_code_expiry() {
        let mut creds = sample_credentials();
        let code = creds.issue_code();

        // Backdate issuance past the TTL
        creds.code_issued_at = Some(Utc::now() - Duration::minutes(11));
        assert!(!creds.verify_code(code.as_str(), Duration::minutes(10)));
    }

    #[test]
    fn test_issuing_replaces_previous_code() {
        let mut creds = sample_credentials();
        let first = creds.issue_code();
        let second = creds.issue_code();

        if first.as_str() != second.as_str() {
            assert!(!creds.verify_code(first.as_str(), Duration::minutes(10)));
        }
        assert!(creds.verify_code(second.as_str(), Duration::minutes(10)));
    }
}
