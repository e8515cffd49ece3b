//! Payment Gateway Port
//!
//! The trait the application layer talks to; the Paystack client in
//! `infra` implements it, and the tests script a fake. Amounts cross
//! this boundary in minor units, unchanged.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    amount::Amount, ids::DonationId, subscription_plan::SubscriptionPlan,
};
use crate::error::FundingResult;

/// Result of initializing a payment: where to send the payer
#[derive(Debug, Clone)]
pub struct InitializedPayment {
    pub authorization_url: String,
    pub access_code: Option<String>,
    pub reference: String,
}

/// Transaction status as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Success,
    Failed,
    Abandoned,
    Pending,
    Reversed,
    Unknown,
}

impl PaymentStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "success" => Self::Success,
            "failed" => Self::Failed,
            "abandoned" => Self::Abandoned,
            "pending" | "ongoing" | "processing" | "queued" => Self::Pending,
            "reversed" => Self::Reversed,
            _ => Self::Unknown,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of verifying a payment reference
#[derive(Debug, Clone)]
pub struct PaymentVerification {
    pub status: PaymentStatus,
    /// Amount the gateway actually collected, minor units
    pub amount: i64,
    pub paid_at: Option<DateTime<Utc>>,
    pub channel: Option<String>,
}

/// Handle to a created gateway subscription
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    pub id: String,
    pub subscription_code: Option<String>,
}

/// Port for the payment gateway
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    /// Start a payment; the payer is redirected to the returned URL
    async fn initialize(
        &self,
        amount: Amount,
        email: &str,
        reference: &DonationId,
    ) -> FundingResult<InitializedPayment>;

    /// Ask the gateway what happened to a reference
    async fn verify(&self, reference: &DonationId) -> FundingResult<PaymentVerification>;

    /// Create a recurring billing subscription
    async fn create_subscription(
        &self,
        amount: Amount,
        email: &str,
        reference: &DonationId,
        plan: SubscriptionPlan,
    ) -> FundingResult<SubscriptionHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_from_code() {
        assert_eq!(PaymentStatus::from_code("success"), PaymentStatus::Success);
        assert_eq!(PaymentStatus::from_code("failed"), PaymentStatus::Failed);
        assert_eq!(
            PaymentStatus::from_code("abandoned"),
            PaymentStatus::Abandoned
        );
        assert_eq!(PaymentStatus::from_code("ongoing"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_code("???"), PaymentStatus::Unknown);
    }

    #[test]
    fn test_only_success_is_success() {
        assert!(PaymentStatus::Success.is_success());
        assert!(!PaymentStatus::Pending.is_success());
        assert!(!PaymentStatus::Unknown.is_success());
    }
}
