//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer. Method names are unique across traits so a single store type
//! can implement the whole surface without call-site ambiguity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::{
    campaign::Campaign, comment::Comment, donation::Donation, medical_case::MedicalCase,
    withdrawal_request::WithdrawalRequest,
};
use crate::domain::value_object::{
    campaign_status::CampaignStatus,
    category::FundraisingCategory,
    ids::{CampaignId, CaseId, DonationId, WithdrawalRequestId},
};
use crate::error::FundingResult;

/// Campaign repository trait
#[trait_variant::make(CampaignRepository: Send)]
pub trait LocalCampaignRepository {
    async fn insert_campaign(&self, campaign: &Campaign) -> FundingResult<()>;

    async fn campaign_by_id(&self, campaign_id: &CampaignId) -> FundingResult<Option<Campaign>>;

    async fn update_campaign(&self, campaign: &Campaign) -> FundingResult<()>;

    async fn delete_campaign(&self, campaign_id: &CampaignId) -> FundingResult<bool>;

    async fn campaigns(&self) -> FundingResult<Vec<Campaign>>;

    async fn campaigns_by_status(&self, status: CampaignStatus) -> FundingResult<Vec<Campaign>>;

    async fn campaigns_by_category(
        &self,
        category: FundraisingCategory,
    ) -> FundingResult<Vec<Campaign>>;

    async fn campaigns_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FundingResult<Vec<Campaign>>;
}

/// Medical case repository trait
#[trait_variant::make(CaseRepository: Send)]
pub trait LocalCaseRepository {
    async fn insert_case(&self, case: &MedicalCase) -> FundingResult<()>;

    async fn case_by_id(&self, case_id: &CaseId) -> FundingResult<Option<MedicalCase>>;

    async fn update_case(&self, case: &MedicalCase) -> FundingResult<()>;

    async fn delete_case(&self, case_id: &CaseId) -> FundingResult<bool>;

    async fn cases(&self) -> FundingResult<Vec<MedicalCase>>;
}

/// What a verified donation credited
#[derive(Debug, Clone)]
pub struct CreditOutcome {
    pub donation: Donation,
    /// The target's accumulated total after crediting
    pub new_total: i64,
}

/// Verified-donation totals for a user
#[derive(Debug, Clone, Default)]
pub struct DonationTotals {
    pub total: i64,
    pub count: i64,
}

/// Donation repository trait
#[trait_variant::make(DonationRepository: Send)]
pub trait LocalDonationRepository {
    async fn insert_donation(&self, donation: &Donation) -> FundingResult<()>;

    async fn donation_by_id(&self, donation_id: &DonationId) -> FundingResult<Option<Donation>>;

    async fn delete_donation(&self, donation_id: &DonationId) -> FundingResult<bool>;

    async fn donations(&self) -> FundingResult<Vec<Donation>>;

    async fn donations_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FundingResult<Vec<Donation>>;

    /// Atomically claim an unverified donation and credit its target.
    ///
    /// Exactly one caller can ever succeed for a given reference:
    /// - unknown reference → `DonationNotFound`
    /// - already verified → `DonationAlreadyVerified` (no credit)
    /// - target row gone → the claim is rolled back
    async fn verify_and_credit(&self, donation_id: &DonationId) -> FundingResult<CreditOutcome>;

    /// Attach the gateway subscription handle to a recurring donation
    async fn set_subscription_ref(
        &self,
        donation_id: &DonationId,
        subscription_ref: &str,
    ) -> FundingResult<()>;

    /// Sum and count of a user's verified donations
    async fn user_donation_totals(&self, public_id: &str) -> FundingResult<DonationTotals>;

    /// Total a user donated to one campaign (verified only)
    async fn user_campaign_total(
        &self,
        public_id: &str,
        campaign_id: &CampaignId,
    ) -> FundingResult<i64>;

    /// Total a user donated to one case (verified only)
    async fn user_case_total(&self, public_id: &str, case_id: &CaseId) -> FundingResult<i64>;

    /// The user's most recent donation, if any
    async fn last_donation_for_user(&self, public_id: &str) -> FundingResult<Option<Donation>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn insert_comment(&self, comment: &Comment) -> FundingResult<()>;

    async fn comments(&self) -> FundingResult<Vec<Comment>>;
}

/// Withdrawal request repository trait
#[trait_variant::make(WithdrawalRequestRepository: Send)]
pub trait LocalWithdrawalRequestRepository {
    async fn insert_request(&self, request: &WithdrawalRequest) -> FundingResult<()>;

    async fn request_by_id(
        &self,
        request_id: &WithdrawalRequestId,
    ) -> FundingResult<Option<WithdrawalRequest>>;

    async fn update_request(&self, request: &WithdrawalRequest) -> FundingResult<()>;

    async fn requests(&self) -> FundingResult<Vec<WithdrawalRequest>>;
}

/// One row of the recent-activity feed
#[derive(Debug, Clone)]
pub struct ActivityItem {
    /// "campaign" | "case" | "donation" | "comment" | "user"
    pub kind: String,
    pub id: Uuid,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Activity feed repository trait
#[trait_variant::make(ActivityRepository: Send)]
pub trait LocalActivityRepository {
    /// Most recent records across all entity types, newest first
    async fn recent_activity(&self, limit: i64) -> FundingResult<Vec<ActivityItem>>;
}

/// Read-only view of the user directory
///
/// Funding responses and inputs speak public ids; this resolves them to
/// the internal key without dragging the auth repository in.
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    async fn user_id_by_public_id(
        &self,
        public_id: &str,
    ) -> FundingResult<Option<auth::models::user_id::UserId>>;
}

/// Umbrella trait for a store implementing the full funding surface
pub trait FundingStore:
    CampaignRepository
    + CaseRepository
    + DonationRepository
    + CommentRepository
    + WithdrawalRequestRepository
    + ActivityRepository
    + UserDirectory
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> FundingStore for T where
    T: CampaignRepository
        + CaseRepository
        + DonationRepository
        + CommentRepository
        + WithdrawalRequestRepository
        + ActivityRepository
        + UserDirectory
        + Clone
        + Send
        + Sync
        + 'static
{
}
