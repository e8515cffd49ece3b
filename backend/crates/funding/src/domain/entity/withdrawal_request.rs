//! Withdrawal Request Entity
//!
//! A campaign owner's request to pay out raised funds to a bank
//! account. Admin approval is a one-shot decision.

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    amount::Amount,
    ids::{CampaignId, WithdrawalRequestId},
    request_status::RequestStatus,
};

/// Withdrawal request entity
#[derive(Debug, Clone)]
pub struct WithdrawalRequest {
    pub request_id: WithdrawalRequestId,
    pub campaign_id: CampaignId,
    pub requester_id: UserId,
    pub amount: Amount,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WithdrawalRequest {
    pub fn new(
        campaign_id: CampaignId,
        requester_id: UserId,
        amount: Amount,
        bank_name: String,
        account_name: String,
        account_number: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            request_id: WithdrawalRequestId::new(),
            campaign_id,
            requester_id,
            amount,
            bank_name,
            account_name,
            account_number,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolve the request. Returns false when it was already decided.
    pub fn resolve(&mut self, decision: RequestStatus) -> bool {
        if self.status.is_resolved() || !decision.is_resolved() {
            return false;
        }
        self.status = decision;
        self.updated_at = Utc::now();
        true
    }
}
