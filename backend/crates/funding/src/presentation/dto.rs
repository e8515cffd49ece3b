//! API DTOs (Data Transfer Objects)
//!
//! Money fields are integer minor units throughout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{
    campaign::Campaign, comment::Comment, donation::Donation, medical_case::MedicalCase,
    withdrawal_request::WithdrawalRequest,
};
use crate::domain::gateway::{PaymentStatus, PaymentVerification};
use crate::domain::repository::ActivityItem;

// ============================================================================
// Campaigns
// ============================================================================

/// Create campaign request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub state: Option<String>,
    pub type_of_fundraising: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Fundraising target, minor units
    pub raise: i64,
    pub medical_report: Option<String>,
    #[serde(default)]
    pub image_or_video: Vec<String>,
    pub sponsor: Option<String>,
    #[serde(default)]
    pub save_as_draft: bool,
}

/// Campaign response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub state: Option<String>,
    pub type_of_fundraising: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub raise: i64,
    pub amount_raised: i64,
    pub amount_remaining: i64,
    pub medical_report: Option<String>,
    pub image_or_video: Vec<String>,
    pub sponsor: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl CampaignResponse {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            id: campaign.campaign_id.into_uuid(),
            owner_id: campaign.owner_id.into_uuid(),
            state: campaign.state.clone(),
            type_of_fundraising: campaign.category.code().to_string(),
            title: campaign.title.clone(),
            description: campaign.description.clone(),
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            raise: campaign.target_amount.minor_units(),
            amount_raised: campaign.amount_raised,
            amount_remaining: campaign.amount_remaining(),
            medical_report: campaign.medical_report.clone(),
            image_or_video: campaign.media.clone(),
            sponsor: campaign.sponsor.clone(),
            status: campaign.status.code().to_string(),
            created_at: campaign.created_at,
        }
    }
}

/// Campaign list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListResponse {
    pub len: usize,
    pub data: Vec<CampaignResponse>,
}

impl CampaignListResponse {
    pub fn from_campaigns(campaigns: &[Campaign]) -> Self {
        Self {
            len: campaigns.len(),
            data: campaigns
                .iter()
                .map(CampaignResponse::from_campaign)
                .collect(),
        }
    }
}

/// Moderation request (`approve` / `decline`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateCampaignRequest {
    pub status: String,
}

// ============================================================================
// Comments
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub campaign_id: Uuid,
    pub content: String,
}

/// Comment response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            campaign_id: comment.campaign_id.into_uuid(),
            author_id: comment.author_id.into_uuid(),
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }
}

/// Comment list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub len: usize,
    pub data: Vec<CommentResponse>,
}

// ============================================================================
// Cases
// ============================================================================

/// Create case request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub name: String,
    pub description: String,
    /// The beneficiary; defaults to the calling admin
    pub owner_public_id: Option<String>,
}

/// Edit case request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCaseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Case response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub amount_donated: i64,
    pub created_at: DateTime<Utc>,
}

impl CaseResponse {
    pub fn from_case(case: &MedicalCase) -> Self {
        Self {
            id: case.case_id.into_uuid(),
            owner_id: case.owner_id.into_uuid(),
            name: case.name.clone(),
            description: case.description.clone(),
            amount_donated: case.amount_donated,
            created_at: case.created_at,
        }
    }
}

/// Case list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseListResponse {
    pub len: usize,
    pub data: Vec<CaseResponse>,
}

// ============================================================================
// Donations
// ============================================================================

/// Donation request (one-off)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    /// Minor units
    pub amount: i64,
    /// Payer email, forwarded to the gateway
    pub email: String,
}

/// Recurring donation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringDonationRequest {
    pub amount: i64,
    pub email: String,
    /// monthly | quarterly | yearly
    pub subscription_plan: String,
}

/// Verify payment request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDonationRequest {
    pub reference: String,
}

/// Donation response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub id: Uuid,
    pub donor_id: Option<Uuid>,
    pub campaign_id: Option<Uuid>,
    pub case_id: Option<Uuid>,
    pub amount: i64,
    pub subscription_plan: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl DonationResponse {
    pub fn from_donation(donation: &Donation) -> Self {
        Self {
            id: donation.donation_id.into_uuid(),
            donor_id: donation.donor_id.map(|id| id.into_uuid()),
            campaign_id: donation.target.campaign_uuid(),
            case_id: donation.target.case_uuid(),
            amount: donation.amount.minor_units(),
            subscription_plan: donation.subscription_plan.map(|p| p.code().to_string()),
            is_verified: donation.is_verified,
            created_at: donation.created_at,
        }
    }
}

/// Donation list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationListResponse {
    pub len: usize,
    pub donations: Vec<DonationResponse>,
}

/// Response to initializing a donation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeDonationResponse {
    pub donation: DonationResponse,
    pub authorization_url: String,
    pub reference: String,
    pub amount_raised: i64,
    /// Absent for case donations
    pub amount_remaining: Option<i64>,
}

/// Gateway data echoed after verification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub status: String,
    pub amount: i64,
    pub paid_at: Option<DateTime<Utc>>,
    pub channel: Option<String>,
}

impl PaymentData {
    pub fn from_verification(verification: &PaymentVerification) -> Self {
        let status = match verification.status {
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Abandoned => "abandoned",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Reversed => "reversed",
            PaymentStatus::Unknown => "unknown",
        };

        Self {
            status: status.to_string(),
            amount: verification.amount,
            paid_at: verification.paid_at,
            channel: verification.channel.clone(),
        }
    }
}

/// Response to a successful verification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDonationResponse {
    pub success: bool,
    pub message: String,
    pub donation: DonationResponse,
    /// The target's verified total after crediting
    pub new_total: i64,
    pub payment_data: PaymentData,
}

/// Total donated by a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalDonationsResponse {
    pub success: bool,
    pub total_donations: i64,
    pub count: Option<i64>,
}

/// A user's most recent donation (None when they never donated)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastDonationResponse {
    pub success: bool,
    pub last_donation: Option<DonationResponse>,
}

// ============================================================================
// Withdrawal requests
// ============================================================================

/// Create withdrawal request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawalRequest {
    /// Minor units
    pub amount: i64,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
}

/// Update withdrawal request body (`approved` / `rejected`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWithdrawalRequest {
    pub status: String,
}

/// Withdrawal request response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequestResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub requester_id: Uuid,
    pub amount: i64,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl WithdrawalRequestResponse {
    pub fn from_request(request: &WithdrawalRequest) -> Self {
        Self {
            id: request.request_id.into_uuid(),
            campaign_id: request.campaign_id.into_uuid(),
            requester_id: request.requester_id.into_uuid(),
            amount: request.amount.minor_units(),
            bank_name: request.bank_name.clone(),
            account_name: request.account_name.clone(),
            account_number: request.account_number.clone(),
            status: request.status.code().to_string(),
            created_at: request.created_at,
        }
    }
}

/// Withdrawal request list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequestListResponse {
    pub len: usize,
    pub data: Vec<WithdrawalRequestResponse>,
}

// ============================================================================
// Activities feed
// ============================================================================

/// One activity feed entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub kind: String,
    pub id: Uuid,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivityResponse {
    pub fn from_item(item: &ActivityItem) -> Self {
        Self {
            kind: item.kind.clone(),
            id: item.id,
            label: item.label.clone(),
            created_at: item.created_at,
        }
    }
}

/// Activities feed response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListResponse {
    pub len: usize,
    pub data: Vec<ActivityResponse>,
}

// ============================================================================
// Queries & generic envelope
// ============================================================================

/// `?interval=weekly|monthly`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalQuery {
    pub interval: Option<String>,
}

/// `?typeOfFundraising=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub type_of_fundraising: Option<String>,
}

/// `?status=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Simple success/message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
