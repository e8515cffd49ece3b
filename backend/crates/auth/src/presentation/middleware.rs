//! Auth Middleware
//!
//! Middleware for requiring authentication (and admin role) on
//! protected routes. `require_auth` resolves the session and stores an
//! [`AuthenticatedUser`] in request extensions for downstream handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::{extract_client_ip, extract_fingerprint};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// The session's user, stored in request extensions by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub public_id: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Middleware that requires a valid auth session
pub async fn require_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(headers, client_ip);

    let fingerprint = match extract_fingerprint(headers, client_ip) {
        Ok(fp) => fp,
        Err(e) => return Err(AuthError::from(e).into_response()),
    };

    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = if let Some(token) = token {
        use_case.get_session(&token, &fingerprint.hash).await.ok()
    } else {
        None
    };

    let Some(session) = session else {
        return Err((StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response());
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: session.user_id,
        public_id: session.public_id.to_string(),
        role: session.role,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires the authenticated user to be an admin
///
/// Must run after `require_auth` (reads its extension).
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, Response> {
    let Some(user) = req.extensions().get::<AuthenticatedUser>() else {
        return Err((StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response());
    };

    if !user.is_admin() {
        return Err(AuthError::AccessDenied.into_response());
    }

    Ok(next.run(req).await)
}
