//! HTTP Handlers - Auth Flows

use axum::Json;
use axum::extract::{ConnectInfo, Extension, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::{ClientFingerprint, extract_client_ip, extract_fingerprint};
use platform::cookie::CookieConfig;
use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, CodePurpose, IssueCodeUseCase, ResetPasswordInput, ResetPasswordUseCase,
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, UpdatePasswordUseCase,
    VerifyAccountUseCase,
};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    EmailRequest, MessageResponse, ResetPasswordRequest, SessionStatusResponse, SignInRequest,
    SignInResponse, SignUpRequest, SignUpResponse, UpdatePasswordRequest, VerifyAccountRequest,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Ping
// ============================================================================

/// GET /api/v1/auth/
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Hello from Auth"))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/auth/signup
pub async fn sign_up<R, M>(
    state: State<AuthAppState<R, M>>,
    headers: HeaderMap,
    connect_info: ConnectInfo<SocketAddr>,
    req: Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    do_sign_up(state, headers, connect_info, req, UserRole::Individual).await
}

/// POST /api/v1/auth/sponsorsignup
pub async fn sponsor_sign_up<R, M>(
    state: State<AuthAppState<R, M>>,
    headers: HeaderMap,
    connect_info: ConnectInfo<SocketAddr>,
    req: Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    do_sign_up(state, headers, connect_info, req, UserRole::Sponsor).await
}

async fn do_sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<SignUpRequest>,
    role: UserRole,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let fingerprint = fingerprint_from(&headers, addr)?;

    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = SignUpInput {
        name: req.name,
        email: req.email,
        password: req.password,
        role,
    };

    let output = use_case.execute(input, fingerprint).await?;

    let cookie = build_session_cookie(&state.config, &output.session_token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SignUpResponse {
            public_id: output.public_id,
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/v1/auth/login
pub async fn sign_in<R, M>(
    state: State<AuthAppState<R, M>>,
    headers: HeaderMap,
    connect_info: ConnectInfo<SocketAddr>,
    req: Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    do_sign_in(state, headers, connect_info, req, UserRole::MEMBER_ROLES).await
}

/// POST /api/v1/auth/adminlogin
pub async fn admin_sign_in<R, M>(
    state: State<AuthAppState<R, M>>,
    headers: HeaderMap,
    connect_info: ConnectInfo<SocketAddr>,
    req: Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    do_sign_in(state, headers, connect_info, req, &[UserRole::Admin]).await
}

async fn do_sign_in<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<SignInRequest>,
    allowed_roles: &[UserRole],
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let fingerprint = fingerprint_from(&headers, addr)?;

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input, allowed_roles, fingerprint).await?;

    let cookie = build_session_cookie(&state.config, &output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            public_id: output.public_id,
        }),
    ))
}

// ============================================================================
// Account Verification
// ============================================================================

/// POST /api/v1/auth/verify
pub async fn verify_account<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<VerifyAccountRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let fingerprint = fingerprint_from(&headers, addr)?;

    let use_case = VerifyAccountUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(&req.code, fingerprint).await?;

    let cookie = build_session_cookie(&state.config, &output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            public_id: output.public_id,
        }),
    ))
}

/// POST /api/v1/auth/resendverification
pub async fn resend_verification<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = IssueCodeUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case
        .execute(&req.email, CodePurpose::AccountVerification)
        .await?;

    Ok(Json(MessageResponse::ok(
        "Verification code sent successfully!",
    )))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/v1/auth/forgotpassword
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = IssueCodeUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case
        .execute(&req.email, CodePurpose::PasswordReset)
        .await?;

    Ok(Json(MessageResponse::ok("Email sent successfully 🚀!")))
}

/// POST /api/v1/auth/resetpassword
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let fingerprint = fingerprint_from(&headers, addr)?;

    let use_case = ResetPasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = ResetPasswordInput {
        code: req.code,
        password: req.password,
        password_confirm: req.password_confirm,
    };

    let output = use_case.execute(input, fingerprint).await?;

    let cookie = build_session_cookie(&state.config, &output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            public_id: output.public_id,
        }),
    ))
}

/// POST /api/v1/auth/updatepassword (authenticated)
pub async fn update_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(req): Json<UpdatePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = UpdatePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            &current.user_id,
            req.current_password,
            req.new_password,
            req.confirm_password,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/v1/auth/logout
pub async fn sign_out<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = build_clear_cookie(&state.config);

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/v1/auth/status
pub async fn session_status<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let fingerprint = fingerprint_from(&headers, addr)?;

    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session_info = if let Some(token) = token {
        use_case.execute(&token, &fingerprint.hash).await.ok()
    } else {
        None
    };

    match session_info {
        Some(info) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            public_id: Some(info.public_id),
            role: Some(info.role),
            expires_at_ms: Some(info.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            public_id: None,
            role: None,
            expires_at_ms: None,
        })),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

pub(crate) fn fingerprint_from(
    headers: &HeaderMap,
    addr: SocketAddr,
) -> AuthResult<ClientFingerprint> {
    let client_ip = extract_client_ip(headers, Some(addr.ip()));
    extract_fingerprint(headers, client_ip).map_err(AuthError::from)
}

fn session_cookie_config(config: &AuthConfig) -> CookieConfig {
    CookieConfig::session(
        config.session_cookie_name.clone(),
        config.cookie_secure,
        config.cookie_same_site,
        config.session_ttl_secs(),
    )
}

pub(crate) fn build_session_cookie(config: &AuthConfig, token: &str) -> String {
    session_cookie_config(config).build_set_cookie(token)
}

pub(crate) fn build_clear_cookie(config: &AuthConfig) -> String {
    session_cookie_config(config).build_delete_cookie()
}
