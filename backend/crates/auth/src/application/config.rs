//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL (sliding, extended on activity)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// How long an emailed one-time code stays valid
    pub one_time_code_ttl: Duration,
    /// Throttle for one-time-code issuance, keyed by email
    pub otp_rate_limit: RateLimitConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            one_time_code_ttl: Duration::from_secs(10 * 60), // 10 minutes
            otp_rate_limit: RateLimitConfig::new(3, 10 * 60), // 3 codes / 10 min
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in seconds (for cookie Max-Age)
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    /// Get session TTL as a chrono duration
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl)
            .unwrap_or_else(|_| chrono::Duration::days(7))
    }

    /// Get one-time-code TTL as a chrono duration
    pub fn code_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.one_time_code_ttl)
            .unwrap_or_else(|_| chrono::Duration::minutes(10))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        // Random secret should not be all zeros
        assert!(config.session_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_ttl_conversions() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_secs(), 7 * 24 * 3600);
        assert_eq!(config.code_ttl_chrono(), chrono::Duration::minutes(10));
    }
}
