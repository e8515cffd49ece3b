//! HTTP Handlers - Donations, Verification, Stats

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;

use auth::middleware::AuthenticatedUser;
use kernel::error::app_error::AppError;

use crate::application::{
    MakeDonationInput, MakeDonationUseCase, VerifyDonationUseCase,
};
use crate::domain::repository::FundingStore;
use crate::domain::value_object::{
    donation_target::DonationTarget,
    ids::{CampaignId, CaseId, DonationId},
    subscription_plan::SubscriptionPlan,
    time_interval::TimeInterval,
};
use crate::error::{FundingError, FundingResult};
use crate::presentation::campaigns::parse_campaign_id;
use crate::presentation::dto::{
    DonationListResponse, DonationRequest, DonationResponse, IntervalQuery, LastDonationResponse,
    MakeDonationResponse, MessageResponse, PaymentData, RecurringDonationRequest,
    TotalDonationsResponse, VerifyDonationRequest, VerifyDonationResponse,
};
use crate::presentation::{AppGateway, AppMailer, FundingAppState};

/// GET /api/v1/donation/
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Hello from donation"))
}

// ============================================================================
// Making donations
// ============================================================================

/// PUT /api/v1/donation/postdonations/{campaign_id}
pub async fn make_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<DonationRequest>,
) -> FundingResult<Json<MakeDonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    initialize_donation(
        &state,
        MakeDonationInput {
            donor_id: Some(current.user_id),
            target: DonationTarget::Campaign(campaign_id),
            amount: req.amount,
            email: req.email,
            subscription_plan: None,
        },
    )
    .await
}

/// PUT /api/v1/donation/visitordonation/{campaign_id} (public)
pub async fn visitor_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
    Json(req): Json<DonationRequest>,
) -> FundingResult<Json<MakeDonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    initialize_donation(
        &state,
        MakeDonationInput {
            donor_id: None,
            target: DonationTarget::Campaign(campaign_id),
            amount: req.amount,
            email: req.email,
            subscription_plan: None,
        },
    )
    .await
}

/// PUT /api/v1/donation/postdonationcase/{case_id}
pub async fn case_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<DonationRequest>,
) -> FundingResult<Json<MakeDonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let case_id = parse_case_id(&id)?;

    initialize_donation(
        &state,
        MakeDonationInput {
            donor_id: Some(current.user_id),
            target: DonationTarget::Case(case_id),
            amount: req.amount,
            email: req.email,
            subscription_plan: None,
        },
    )
    .await
}

/// POST /api/v1/donation/recurring/{campaign_id}
pub async fn recurring_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<RecurringDonationRequest>,
) -> FundingResult<Json<MakeDonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    let plan = SubscriptionPlan::from_code(&req.subscription_plan)
        .ok_or_else(|| FundingError::bad_request("Invalid subscription plan"))?;

    initialize_donation(
        &state,
        MakeDonationInput {
            donor_id: Some(current.user_id),
            target: DonationTarget::Campaign(campaign_id),
            amount: req.amount,
            email: req.email,
            subscription_plan: Some(plan),
        },
    )
    .await
}

async fn initialize_donation<R, G, M>(
    state: &FundingAppState<R, G, M>,
    input: MakeDonationInput,
) -> FundingResult<Json<MakeDonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let use_case = MakeDonationUseCase::new(state.repo.clone(), state.gateway.clone());
    let output = use_case.execute(input).await?;

    Ok(Json(MakeDonationResponse {
        donation: DonationResponse::from_donation(&output.donation),
        authorization_url: output.authorization_url,
        reference: output.reference,
        amount_raised: output.amount_raised,
        amount_remaining: output.amount_remaining,
    }))
}

// ============================================================================
// Verification
// ============================================================================

/// POST /api/v1/donation/verify (also /verify/visitor and /verify/case)
///
/// Idempotent with respect to the ledger: replaying a reference returns
/// 409 and credits nothing.
pub async fn verify_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Json(req): Json<VerifyDonationRequest>,
) -> FundingResult<Json<VerifyDonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let use_case = VerifyDonationUseCase::new(state.repo.clone(), state.gateway.clone());
    let output = use_case.execute(&req.reference).await?;

    Ok(Json(VerifyDonationResponse {
        success: true,
        message: "Payment verification successful".to_string(),
        donation: DonationResponse::from_donation(&output.donation),
        new_total: output.new_total,
        payment_data: PaymentData::from_verification(&output.verification),
    }))
}

// ============================================================================
// Donation reads
// ============================================================================

/// GET /api/v1/donation/getdonations
pub async fn list_donations<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
) -> FundingResult<Json<DonationListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let donations = state.repo.donations().await?;

    Ok(Json(DonationListResponse {
        len: donations.len(),
        donations: donations
            .iter()
            .map(DonationResponse::from_donation)
            .collect(),
    }))
}

/// GET /api/v1/donation/donations?interval=weekly|monthly
pub async fn donations_by_interval<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Query(query): Query<IntervalQuery>,
) -> FundingResult<Json<DonationListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let donations = match query.interval.as_deref() {
        Some(code) => {
            let interval = TimeInterval::from_code(code)
                .ok_or_else(|| FundingError::bad_request("Invalid interval value"))?;
            let (start, end) = interval.window(Utc::now());
            let donations = state.repo.donations_created_between(start, end).await?;

            if donations.is_empty() {
                return Err(FundingError::Validation(AppError::not_found(format!(
                    "No donations found within the {} interval",
                    interval.code()
                ))));
            }
            donations
        }
        None => state.repo.donations().await?,
    };

    Ok(Json(DonationListResponse {
        len: donations.len(),
        donations: donations
            .iter()
            .map(DonationResponse::from_donation)
            .collect(),
    }))
}

/// GET /api/v1/donation/getdonation/{id}
pub async fn get_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
) -> FundingResult<Json<DonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let donation_id = parse_donation_id(&id)?;

    let donation = state
        .repo
        .donation_by_id(&donation_id)
        .await?
        .ok_or(FundingError::DonationNotFound)?;

    Ok(Json(DonationResponse::from_donation(&donation)))
}

/// DELETE /api/v1/donation/deletedonation/{id} (admin)
pub async fn delete_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
) -> FundingResult<StatusCode>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let donation_id = parse_donation_id(&id)?;

    if !state.repo.delete_donation(&donation_id).await? {
        return Err(FundingError::DonationNotFound);
    }

    tracing::info!(donation_id = %donation_id, "Donation deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Stats
// ============================================================================

/// GET /api/v1/donation/total/{public_id}
pub async fn user_totals<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(public_id): Path<String>,
) -> FundingResult<Json<TotalDonationsResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let totals = state.repo.user_donation_totals(&public_id).await?;

    Ok(Json(TotalDonationsResponse {
        success: true,
        total_donations: totals.total,
        count: Some(totals.count),
    }))
}

/// GET /api/v1/donation/users/{public_id}/campaign/{campaign_id}/donations/total
pub async fn user_campaign_total<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path((public_id, campaign_id)): Path<(String, String)>,
) -> FundingResult<Json<TotalDonationsResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&campaign_id)?;

    let total = state
        .repo
        .user_campaign_total(&public_id, &campaign_id)
        .await?;

    Ok(Json(TotalDonationsResponse {
        success: true,
        total_donations: total,
        count: None,
    }))
}

/// GET /api/v1/donation/users/{public_id}/cases/{case_id}/donations/total
pub async fn user_case_total<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path((public_id, case_id)): Path<(String, String)>,
) -> FundingResult<Json<TotalDonationsResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let case_id = parse_case_id(&case_id)?;

    let total = state.repo.user_case_total(&public_id, &case_id).await?;

    Ok(Json(TotalDonationsResponse {
        success: true,
        total_donations: total,
        count: None,
    }))
}

/// GET /api/v1/donation/last/{public_id}
pub async fn last_donation<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(public_id): Path<String>,
) -> FundingResult<Json<LastDonationResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let donation = state.repo.last_donation_for_user(&public_id).await?;

    Ok(Json(LastDonationResponse {
        success: true,
        last_donation: donation.as_ref().map(DonationResponse::from_donation),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

pub(crate) fn parse_case_id(id: &str) -> FundingResult<CaseId> {
    CaseId::parse_str(id.trim()).map_err(|_| FundingError::bad_request("Invalid case id"))
}

fn parse_donation_id(id: &str) -> FundingResult<DonationId> {
    DonationId::parse_str(id.trim()).map_err(|_| FundingError::bad_request("Invalid donation id"))
}
