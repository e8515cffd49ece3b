//! HTTP Handlers - Medical Cases

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use auth::middleware::AuthenticatedUser;

use crate::application::ManageCaseUseCase;
use crate::domain::entity::medical_case::CaseUpdate;
use crate::domain::repository::FundingStore;
use crate::error::{FundingError, FundingResult};
use crate::presentation::donations::parse_case_id;
use crate::presentation::dto::{
    CaseListResponse, CaseResponse, CreateCaseRequest, EditCaseRequest, MessageResponse,
};
use crate::presentation::{AppGateway, AppMailer, FundingAppState};

/// GET /api/v1/case/
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Hello from Cases"))
}

/// GET /api/v1/case/getcases
pub async fn list_cases<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
) -> FundingResult<Json<CaseListResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let cases = state.repo.cases().await?;

    Ok(Json(CaseListResponse {
        len: cases.len(),
        data: cases.iter().map(CaseResponse::from_case).collect(),
    }))
}

/// GET /api/v1/case/getcase/{id}
pub async fn get_case<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
) -> FundingResult<Json<CaseResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let case_id = parse_case_id(&id)?;

    let case = state
        .repo
        .case_by_id(&case_id)
        .await?
        .ok_or(FundingError::CaseNotFound)?;

    Ok(Json(CaseResponse::from_case(&case)))
}

/// POST /api/v1/case/postcase (admin)
pub async fn create_case<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(req): Json<CreateCaseRequest>,
) -> FundingResult<(StatusCode, Json<CaseResponse>)>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    // The case belongs to the named beneficiary, or to the creating
    // admin when none is given
    let owner_id = match req.owner_public_id.as_deref() {
        Some(public_id) => state
            .repo
            .user_id_by_public_id(public_id)
            .await?
            .ok_or(FundingError::UserNotFound)?,
        None => current.user_id,
    };

    let use_case = ManageCaseUseCase::new(state.repo.clone());
    let case = use_case.create(owner_id, req.name, req.description).await?;

    Ok((StatusCode::CREATED, Json(CaseResponse::from_case(&case))))
}

/// PUT /api/v1/case/editcase/{id} (admin)
pub async fn edit_case<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
    Json(req): Json<EditCaseRequest>,
) -> FundingResult<Json<CaseResponse>>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let case_id = parse_case_id(&id)?;

    let use_case = ManageCaseUseCase::new(state.repo.clone());
    let case = use_case
        .edit(
            &case_id,
            CaseUpdate {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(CaseResponse::from_case(&case)))
}

/// DELETE /api/v1/case/deletecase/{id} (admin)
pub async fn delete_case<R, G, M>(
    State(state): State<FundingAppState<R, G, M>>,
    Path(id): Path<String>,
) -> FundingResult<StatusCode>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    let case_id = parse_case_id(&id)?;

    let use_case = ManageCaseUseCase::new(state.repo.clone());
    use_case.delete(&case_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
