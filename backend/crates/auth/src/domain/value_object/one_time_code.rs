//! One-Time Code Value Object
//!
//! 4-digit numeric code emailed to a user for account activation and
//! password reset. Leading zeros are significant, so the code is a
//! string end to end. Expiry is tracked by the owning entity
//! ([`crate::domain::entity::credentials::Credentials`]), not here.

use platform::crypto::{constant_time_eq, random_numeric_code};
use std::fmt;

/// Number of digits in a one-time code
pub const CODE_LENGTH: usize = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    /// Generate a fresh random code
    pub fn generate() -> Self {
        Self(random_numeric_code(CODE_LENGTH))
    }

    /// Create from database value (assumed well-formed)
    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a candidate in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), candidate.trim().as_bytes())
    }
}

impl fmt::Debug for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OneTimeCode").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let code = OneTimeCode::generate();
        assert_eq!(code.as_str().len(), CODE_LENGTH);
        assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_matches() {
        let code = OneTimeCode::from_db("0412");
        assert!(code.matches("0412"));
        assert!(code.matches(" 0412 "));
        assert!(!code.matches("412"));
        assert!(!code.matches("0413"));
    }

    #[test]
    fn test_debug_redacted() {
        let code = OneTimeCode::from_db("0412");
        assert!(!format!("{:?}", code).contains("0412"));
    }
}
