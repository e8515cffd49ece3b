//! Application Configuration
//!
//! Configuration for the Funding application layer. Gateway endpoint
//! and secret key are the Paystack client's own construction arguments.

/// Funding application configuration
#[derive(Debug, Clone)]
pub struct FundingConfig {
    /// Where withdrawal-request notifications go; None disables them
    pub admin_email: Option<String>,
    /// Upper bound for the activities feed
    pub activity_limit: i64,
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            admin_email: None,
            activity_limit: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FundingConfig::default();
        assert!(config.admin_email.is_none());
        assert_eq!(config.activity_limit, 100);
    }
}
