//! Campaign Entity

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    amount::Amount, campaign_status::CampaignStatus, category::FundraisingCategory,
    ids::CampaignId,
};

/// Everything a user submits when opening a campaign
#[derive(Debug, Clone)]
pub struct CampaignSpec {
    /// Location (state/region) the beneficiary lives in
    pub state: Option<String>,
    pub category: FundraisingCategory,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Fundraising target in minor units
    pub target_amount: Amount,
    pub medical_report: Option<String>,
    /// Image/video URLs
    pub media: Vec<String>,
    pub sponsor: Option<String>,
    pub save_as_draft: bool,
}

/// Campaign entity
#[derive(Debug, Clone)]
pub struct Campaign {
    pub campaign_id: CampaignId,
    pub owner_id: UserId,
    pub state: Option<String>,
    pub category: FundraisingCategory,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub target_amount: Amount,
    /// Sum of verified donations, maintained by the verification
    /// transaction. Never written directly by application code.
    pub amount_raised: i64,
    pub medical_report: Option<String>,
    pub media: Vec<String>,
    pub sponsor: Option<String>,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Create a new campaign awaiting moderation (or a draft)
    pub fn new(owner_id: UserId, spec: CampaignSpec) -> Self {
        let now = Utc::now();
        let status = if spec.save_as_draft {
            CampaignStatus::Draft
        } else {
            CampaignStatus::Pending
        };

        Self {
            campaign_id: CampaignId::new(),
            owner_id,
            state: spec.state,
            category: spec.category,
            title: spec.title,
            description: spec.description,
            start_date: spec.start_date,
            end_date: spec.end_date,
            target_amount: spec.target_amount,
            amount_raised: 0,
            medical_report: spec.medical_report,
            media: spec.media,
            sponsor: spec.sponsor,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// What is still missing to reach the target
    pub fn amount_remaining(&self) -> i64 {
        self.target_amount
            .minor_units()
            .saturating_sub(self.amount_raised)
            .max(0)
    }

    /// Whether new donations are accepted
    pub fn accepts_donations(&self) -> bool {
        self.status.accepts_donations()
    }

    /// Draft → Pending. Returns false when the campaign is not a draft.
    pub fn publish(&mut self) -> bool {
        if self.status != CampaignStatus::Draft {
            return false;
        }
        self.status = CampaignStatus::Pending;
        self.updated_at = Utc::now();
        true
    }

    /// Moderation decision. Returns false for campaigns that were
    /// already approved or declined.
    pub fn moderate(&mut self, approve: bool) -> bool {
        if !self.status.is_moderatable() {
            return false;
        }
        self.status = if approve {
            CampaignStatus::Approved
        } else {
            CampaignStatus::Declined
        };
        self.updated_at = Utc::now();
        true
    }

    /// Close the campaign to further donations
    pub fn close(&mut self) {
        self.status = CampaignStatus::Closed;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec(save_as_draft: bool) -> CampaignSpec {
        CampaignSpec {
            state: Some("Lagos".to_string()),
            category: FundraisingCategory::Surgery,
            title: "Surgery for Bola".to_string(),
            description: "Help fund a corrective surgery".to_string(),
            start_date: None,
            end_date: None,
            target_amount: Amount::from_minor_units(5_000_000).unwrap(),
            medical_report: None,
            media: vec![],
            sponsor: None,
            save_as_draft,
        }
    }

    #[test]
    fn test_new_campaign_is_pending() {
        let campaign = Campaign::new(UserId::new(), sample_spec(false));
        assert_eq!(campaign.status, CampaignStatus::Pending);
        assert_eq!(campaign.amount_raised, 0);
        assert_eq!(campaign.amount_remaining(), 5_000_000);
        assert!(campaign.accepts_donations());
    }

    #[test]
    fn test_draft_publish() {
        let mut campaign = Campaign::new(UserId::new(), sample_spec(true));
        assert_eq!(campaign.status, CampaignStatus::Draft);

        assert!(campaign.publish());
        assert_eq!(campaign.status, CampaignStatus::Pending);

        // Publishing twice fails
        assert!(!campaign.publish());
    }

    #[test]
    fn test_moderation() {
        let mut campaign = Campaign::new(UserId::new(), sample_spec(false));
        assert!(campaign.moderate(true));
        assert_eq!(campaign.status, CampaignStatus::Approved);

        // A decided campaign cannot be re-moderated
        assert!(!campaign.moderate(false));
        assert_eq!(campaign.status, CampaignStatus::Approved);
    }

    #[test]
    fn test_close_stops_donations() {
        let mut campaign = Campaign::new(UserId::new(), sample_spec(false));
        campaign.close();
        assert_eq!(campaign.status, CampaignStatus::Closed);
        assert!(!campaign.accepts_donations());
    }

    #[test]
    fn test_amount_remaining_never_negative() {
        let mut campaign = Campaign::new(UserId::new(), sample_spec(false));
        campaign.amount_raised = 6_000_000;
        assert_eq!(campaign.amount_remaining(), 0);
    }
}
