//! HTTP Handlers - User Profiles

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use platform::mailer::Mailer;

use crate::domain::entity::user::ProfileUpdate;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::{
    display_name::DisplayName, gender::Gender, public_id::PublicId, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    EditProfileRequest, MessageResponse, UserListResponse, UserResponse, UsersQuery,
};
use crate::presentation::handlers::AuthAppState;
use crate::presentation::middleware::AuthenticatedUser;

/// GET /api/v1/user/
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Hello from User"))
}

/// GET /api/v1/user/getusers
pub async fn list_users<R, M>(
    State(state): State<AuthAppState<R, M>>,
) -> AuthResult<Json<UserListResponse>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let users = state.repo.list(None).await?;

    Ok(Json(UserListResponse {
        len: users.len(),
        data: users.iter().map(UserResponse::from_user).collect(),
    }))
}

/// GET /api/v1/user/getprofile/{public_id}
pub async fn get_profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(public_id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let public_id = PublicId::parse_str(&public_id)?;

    let user = state
        .repo
        .find_by_public_id(&public_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// PUT /api/v1/user/editprofile/{public_id}
///
/// A user may edit themselves; admins may edit anyone. Only the
/// whitelisted profile fields are touched.
pub async fn edit_profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(public_id): Path<String>,
    Json(req): Json<EditProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let public_id = PublicId::parse_str(&public_id)?;

    if current.public_id != public_id.as_str() && !current.is_admin() {
        return Err(AuthError::AccessDenied);
    }

    let mut user = state
        .repo
        .find_by_public_id(&public_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let name = req.name.map(DisplayName::new).transpose()?;

    let gender = match req.gender {
        Some(code) => Some(Gender::from_code(&code).ok_or_else(|| {
            AuthError::Validation(crate::AppError::bad_request("Invalid gender value"))
        })?),
        None => None,
    };

    user.apply_profile_update(ProfileUpdate {
        name,
        gender,
        phone: req.phone,
        profile_set: req.profile_set,
    });

    crate::domain::repository::UserRepository::update(&*state.repo, &user).await?;

    tracing::info!(public_id = %user.public_id, "Profile updated");

    Ok(Json(UserResponse::from_user(&user)))
}

/// DELETE /api/v1/user/deleteprofile/{public_id} (admin)
pub async fn delete_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(public_id): Path<String>,
) -> AuthResult<StatusCode>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let public_id = PublicId::parse_str(&public_id)?;

    let user = state
        .repo
        .find_by_public_id(&public_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    if !crate::domain::repository::UserRepository::delete(&*state.repo, &user.user_id).await? {
        return Err(AuthError::UserNotFound);
    }

    tracing::info!(public_id = %public_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/user/admin/users?role= (admin)
pub async fn admin_list_users<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Query(query): Query<UsersQuery>,
) -> AuthResult<Json<UserListResponse>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let role = match query.role.as_deref() {
        Some(code) => Some(UserRole::from_code(code).ok_or_else(|| {
            AuthError::Validation(crate::AppError::bad_request("Invalid role value"))
        })?),
        None => None,
    };

    let users = state.repo.list(role).await?;

    if users.is_empty() {
        return Err(AuthError::UserNotFound);
    }

    Ok(Json(UserListResponse {
        len: users.len(),
        data: users.iter().map(UserResponse::from_user).collect(),
    }))
}
