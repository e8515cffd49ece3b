//! Donation Entity
//!
//! A donation is created unverified when the payer is redirected to the
//! gateway; its id is the payment reference. Verification flips
//! `is_verified` and credits the target - exactly once.

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    amount::Amount, donation_target::DonationTarget, ids::DonationId,
    subscription_plan::SubscriptionPlan,
};

/// Donation entity
#[derive(Debug, Clone)]
pub struct Donation {
    /// Doubles as the gateway payment reference
    pub donation_id: DonationId,
    /// Absent for visitor (anonymous) donations
    pub donor_id: Option<UserId>,
    pub target: DonationTarget,
    pub amount: Amount,
    /// Present for recurring donations
    pub subscription_plan: Option<SubscriptionPlan>,
    /// Gateway subscription handle, once one was created
    pub subscription_ref: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    pub fn new(
        donor_id: Option<UserId>,
        target: DonationTarget,
        amount: Amount,
        subscription_plan: Option<SubscriptionPlan>,
    ) -> Self {
        Self {
            donation_id: DonationId::new(),
            donor_id,
            target,
            amount,
            subscription_plan,
            subscription_ref: None,
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    /// The reference string sent to the payment gateway
    pub fn reference(&self) -> String {
        self.donation_id.to_string()
    }

    pub fn is_recurring(&self) -> bool {
        self.subscription_plan.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::ids::CampaignId;

    #[test]
    fn test_new_donation_is_unverified() {
        let donation = Donation::new(
            Some(UserId::new()),
            DonationTarget::Campaign(CampaignId::new()),
            Amount::from_minor_units(25_000).unwrap(),
            None,
        );
        assert!(!donation.is_verified);
        assert!(!donation.is_recurring());
        assert_eq!(donation.reference(), donation.donation_id.to_string());
    }

    #[test]
    fn test_visitor_donation_has_no_donor() {
        let donation = Donation::new(
            None,
            DonationTarget::Campaign(CampaignId::new()),
            Amount::from_minor_units(1_000).unwrap(),
            None,
        );
        assert!(donation.donor_id.is_none());
    }

    #[test]
    fn test_recurring_flag() {
        let donation = Donation::new(
            Some(UserId::new()),
            DonationTarget::Campaign(CampaignId::new()),
            Amount::from_minor_units(10_000).unwrap(),
            Some(SubscriptionPlan::Monthly),
        );
        assert!(donation.is_recurring());
    }
}
