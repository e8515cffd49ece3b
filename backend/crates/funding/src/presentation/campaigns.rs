//! HTTP Handlers - Campaigns, Comments, Withdrawals, Moderation

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;

use auth::middleware::AuthenticatedUser;
use kernel::error::app_error::AppError;

use crate::application::{
    CreateCampaignInput, CreateCampaignUseCase, ModerateCampaignUseCase, ModerationAction,
    PostCommentUseCase, WithdrawalInput, WithdrawalUseCase,
};
use crate::domain::repository::FundingStore;
use crate::domain::value_object::{
    campaign_status::CampaignStatus,
    category::FundraisingCategory,
    ids::{CampaignId, WithdrawalRequestId},
    time_interval::TimeInterval,
};
use crate::error::{FundingError, FundingResult};
use crate::presentation::dto::{
    ActivityListResponse, ActivityResponse, CampaignListResponse, CampaignResponse, CategoryQuery,
    CommentListResponse, CommentResponse, CreateCampaignRequest, CreateCommentRequest,
    CreateWithdrawalRequest, IntervalQuery, MessageResponse, ModerateCampaignRequest, StatusQuery,
    UpdateWithdrawalRequest, WithdrawalRequestListResponse, WithdrawalRequestResponse,
};
use crate::presentation::{AppGateway, AppMailer, FundingAppState};

/// GET /api/v1/campaign/
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Hello from Campaign"))
}

// ============================================================================
// Campaign reads (public)
// ============================================================================

/// GET /api/v1/campaign/getcampaigns
pub async fn list_campaigns<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
) -> FundingResult<Json<CampaignListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaigns = state.repo.campaigns().await?;
    Ok(Json(CampaignListResponse::from_campaigns(&campaigns)))
}

/// GET /api/v1/campaign/getcampaign/{id}
pub async fn get_campaign<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
) -> FundingResult<Json<CampaignResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    let campaign = state
        .repo
        .campaign_by_id(&campaign_id)
        .await?
        .ok_or(FundingError::CampaignNotFound)?;

    Ok(Json(CampaignResponse::from_campaign(&campaign)))
}

/// GET /api/v1/campaign/campaigns?interval=weekly|monthly
pub async fn campaigns_by_interval<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Query(query): Query<IntervalQuery>,
) -> FundingResult<Json<CampaignListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaigns = match query.interval.as_deref() {
        Some(code) => {
            let interval = TimeInterval::from_code(code)
                .ok_or_else(|| FundingError::bad_request("Invalid interval value"))?;
            let (start, end) = interval.window(Utc::now());
            let campaigns = state.repo.campaigns_created_between(start, end).await?;

            if campaigns.is_empty() {
                return Err(FundingError::Validation(AppError::not_found(format!(
                    "No campaigns found within the {} interval",
                    interval.code()
                ))));
            }
            campaigns
        }
        None => state.repo.campaigns().await?,
    };

    Ok(Json(CampaignListResponse::from_campaigns(&campaigns)))
}

/// GET /api/v1/campaign/campaign?typeOfFundraising=
pub async fn campaigns_by_category<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Query(query): Query<CategoryQuery>,
) -> FundingResult<Json<CampaignListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaigns = match query.type_of_fundraising.as_deref() {
        Some(code) => {
            let category = FundraisingCategory::from_code(code)
                .ok_or_else(|| FundingError::bad_request("Invalid type of fundraising"))?;
            let campaigns = state.repo.campaigns_by_category(category).await?;

            if campaigns.is_empty() {
                return Err(FundingError::Validation(AppError::not_found(format!(
                    "No campaigns found for the type of fundraising: {}",
                    category.code()
                ))));
            }
            campaigns
        }
        None => state.repo.campaigns().await?,
    };

    Ok(Json(CampaignListResponse::from_campaigns(&campaigns)))
}

/// GET /api/v1/user/campaigns?status= (moderation dashboard)
pub async fn campaigns_by_status<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Query(query): Query<StatusQuery>,
) -> FundingResult<Json<CampaignListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaigns = match query.status.as_deref() {
        Some(code) => {
            let status = CampaignStatus::from_code(code)
                .ok_or_else(|| FundingError::bad_request("Invalid status value"))?;
            state.repo.campaigns_by_status(status).await?
        }
        None => state.repo.campaigns().await?,
    };

    Ok(Json(CampaignListResponse::from_campaigns(&campaigns)))
}

// ============================================================================
// Campaign writes
// ============================================================================

/// POST /api/v1/campaign/postcampaign
pub async fn create_campaign<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(req): Json<CreateCampaignRequest>,
) -> FundingResult<(StatusCode, Json<CampaignResponse>)>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let use_case = CreateCampaignUseCase::new(state.repo.clone());

    let input = CreateCampaignInput {
        state: req.state,
        category: req.type_of_fundraising,
        title: req.title,
        description: req.description,
        start_date: req.start_date,
        end_date: req.end_date,
        target_amount: req.raise,
        medical_report: req.medical_report,
        media: req.image_or_video,
        sponsor: req.sponsor,
        save_as_draft: req.save_as_draft,
    };

    let campaign = use_case.execute(current.user_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CampaignResponse::from_campaign(&campaign)),
    ))
}

/// POST /api/v1/campaign/postdraft/{campaign_id}
pub async fn publish_draft<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> FundingResult<Json<CampaignResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    let use_case = ModerateCampaignUseCase::new(state.repo.clone());
    let campaign = use_case
        .publish_draft(&campaign_id, &current.user_id, current.is_admin())
        .await?;

    Ok(Json(CampaignResponse::from_campaign(&campaign)))
}

/// PATCH /api/v1/campaign/close/{id}
pub async fn close_campaign<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> FundingResult<Json<CampaignResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    let use_case = ModerateCampaignUseCase::new(state.repo.clone());
    let campaign = use_case
        .close(&campaign_id, &current.user_id, current.is_admin())
        .await?;

    Ok(Json(CampaignResponse::from_campaign(&campaign)))
}

/// PUT /api/v1/user/admin/approve/{campaign_id} (admin)
pub async fn moderate_campaign<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
    Json(req): Json<ModerateCampaignRequest>,
) -> FundingResult<Json<CampaignResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    let action = ModerationAction::from_code(&req.status)
        .ok_or_else(|| FundingError::bad_request("Invalid action"))?;

    let use_case = ModerateCampaignUseCase::new(state.repo.clone());
    let campaign = use_case.moderate(&campaign_id, action).await?;

    Ok(Json(CampaignResponse::from_campaign(&campaign)))
}

/// DELETE /api/v1/campaign/deletecampaign/{id} (admin)
pub async fn delete_campaign<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
) -> FundingResult<StatusCode>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    let use_case = ModerateCampaignUseCase::new(state.repo.clone());
    use_case.delete(&campaign_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/v1/campaign/getallcomments
pub async fn list_comments<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
) -> FundingResult<Json<CommentListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let comments = state.repo.comments().await?;

    Ok(Json(CommentListResponse {
        len: comments.len(),
        data: comments.iter().map(CommentResponse::from_comment).collect(),
    }))
}

/// POST /api/v1/campaign/postcomment
pub async fn post_comment<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(req): Json<CreateCommentRequest>,
) -> FundingResult<(StatusCode, Json<CommentResponse>)>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = CampaignId::from_uuid(req.campaign_id);

    let use_case = PostCommentUseCase::new(state.repo.clone());
    let comment = use_case
        .execute(&campaign_id, current.user_id, req.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::from_comment(&comment)),
    ))
}

// ============================================================================
// Withdrawal requests
// ============================================================================

/// POST /api/v1/campaign/request/{campaign_id}
pub async fn create_withdrawal<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<CreateWithdrawalRequest>,
) -> FundingResult<(StatusCode, Json<WithdrawalRequestResponse>)>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let campaign_id = parse_campaign_id(&id)?;

    let use_case =
        WithdrawalUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());

    let request = use_case
        .create(
            current.user_id,
            &campaign_id,
            WithdrawalInput {
                amount: req.amount,
                bank_name: req.bank_name,
                account_name: req.account_name,
                account_number: req.account_number,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WithdrawalRequestResponse::from_request(&request)),
    ))
}

/// GET /api/v1/campaign/allrequest
pub async fn list_withdrawals<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
) -> FundingResult<Json<WithdrawalRequestListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let requests = state.repo.requests().await?;

    Ok(Json(WithdrawalRequestListResponse {
        len: requests.len(),
        data: requests
            .iter()
            .map(WithdrawalRequestResponse::from_request)
            .collect(),
    }))
}

/// PATCH /api/v1/campaign/approve/{request_id} (admin)
pub async fn update_withdrawal<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateWithdrawalRequest>,
) -> FundingResult<Json<WithdrawalRequestResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let request_id = WithdrawalRequestId::parse_str(id.trim())
        .map_err(|_| FundingError::bad_request("Invalid request id"))?;

    let use_case =
        WithdrawalUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());
    let request = use_case.resolve(&request_id, &req.status).await?;

    Ok(Json(WithdrawalRequestResponse::from_request(&request)))
}

// ============================================================================
// Activities feed
// ============================================================================

/// GET /api/v1/user/activities
pub async fn activities<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
) -> FundingResult<Json<ActivityListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let items = state
        .repo
        .recent_activity(state.config.activity_limit)
        .await?;

    Ok(Json(ActivityListResponse {
        len: items.len(),
        data: items.iter().map(ActivityResponse::from_item).collect(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

pub(crate) fn parse_campaign_id(id: &str) -> FundingResult<CampaignId> {
    CampaignId::parse_str(id.trim()).map_err(|_| FundingError::bad_request("Invalid campaign id"))
}
