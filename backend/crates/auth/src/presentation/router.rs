//! Auth Routers
//!
//! `auth_router` serves `/api/v1/auth/*`, `user_router` serves the
//! profile endpoints under `/api/v1/user/*`.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use platform::mailer::AnyMailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_admin, require_auth};
use crate::presentation::profile;

type State = AuthAppState<PgAuthRepository, AnyMailer>;

fn app_state(repo: &PgAuthRepository, mailer: &AnyMailer, config: &AuthConfig) -> State {
    AuthAppState {
        repo: Arc::new(repo.clone()),
        mailer: Arc::new(mailer.clone()),
        config: Arc::new(config.clone()),
    }
}

/// Middleware state for `require_auth`, shared with other routers
pub fn auth_middleware_state(
    repo: &PgAuthRepository,
    config: &AuthConfig,
) -> AuthMiddlewareState<PgAuthRepository> {
    AuthMiddlewareState {
        repo: Arc::new(repo.clone()),
        config: Arc::new(config.clone()),
    }
}

/// Create the Auth router (`/api/v1/auth`)
pub fn auth_router(repo: PgAuthRepository, mailer: AnyMailer, config: AuthConfig) -> Router {
    let state = app_state(&repo, &mailer, &config);
    let mw_state = auth_middleware_state(&repo, &config);

    let protected = Router::new()
        .route(
            "/updatepassword",
            post(handlers::update_password::<PgAuthRepository, AnyMailer>),
        )
        .route_layer(middleware::from_fn_with_state(
            mw_state,
            require_auth::<PgAuthRepository>,
        ))
        .with_state(state.clone());

    Router::new()
        .route("/", get(handlers::ping))
        .route(
            "/signup",
            post(handlers::sign_up::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/sponsorsignup",
            post(handlers::sponsor_sign_up::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/login",
            post(handlers::sign_in::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/adminlogin",
            post(handlers::admin_sign_in::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/verify",
            post(handlers::verify_account::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/resendverification",
            post(handlers::resend_verification::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/forgotpassword",
            post(handlers::forgot_password::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/resetpassword",
            post(handlers::reset_password::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/logout",
            post(handlers::sign_out::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/status",
            get(handlers::session_status::<PgAuthRepository, AnyMailer>),
        )
        .with_state(state)
        .merge(protected)
}

/// Create the User router (`/api/v1/user`), all routes authenticated
pub fn user_router(repo: PgAuthRepository, mailer: AnyMailer, config: AuthConfig) -> Router {
    let state = app_state(&repo, &mailer, &config);
    let mw_state = auth_middleware_state(&repo, &config);

    let admin = Router::new()
        .route(
            "/admin/users",
            get(profile::admin_list_users::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/deleteprofile/{public_id}",
            delete(profile::delete_user::<PgAuthRepository, AnyMailer>),
        )
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(profile::ping))
        .route(
            "/getusers",
            get(profile::list_users::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/getprofile/{public_id}",
            get(profile::get_profile::<PgAuthRepository, AnyMailer>),
        )
        .route(
            "/editprofile/{public_id}",
            put(profile::edit_profile::<PgAuthRepository, AnyMailer>),
        )
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            mw_state,
            require_auth::<PgAuthRepository>,
        ))
        .with_state(state)
}
