//! Funding Routers
//!
//! One router per URL prefix: `/api/v1/campaign`, `/api/v1/donation`,
//! `/api/v1/case`, plus the moderation/activities routes that extend
//! `/api/v1/user`. Authentication middleware comes from the auth crate.

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;

use auth::PgAuthRepository;
use auth::middleware::{AuthMiddlewareState, require_admin, require_auth};
use platform::mailer::AnyMailer;

use crate::application::config::FundingConfig;
use crate::infra::paystack::PaystackGateway;
use crate::infra::postgres::PgFundingRepository;
use crate::presentation::{FundingAppState, campaigns, cases, donations};

type Store = PgFundingRepository;
type Gateway = PaystackGateway;
type Mail = AnyMailer;
type State = FundingAppState<Store, Gateway, Mail>;
type AuthState = AuthMiddlewareState<PgAuthRepository>;

/// Build the shared funding handler state
pub fn funding_state(
    repo: PgFundingRepository,
    gateway: PaystackGateway,
    mailer: AnyMailer,
    config: FundingConfig,
) -> State {
    FundingAppState {
        repo: Arc::new(repo),
        gateway: Arc::new(gateway),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    }
}

/// Create the Campaign router (`/api/v1/campaign`)
pub fn campaign_router(state: State, auth: AuthState) -> Router {
    let public = Router::new()
        .route(
            "/getcampaigns",
            get(campaigns::list_campaigns::<Store, Gateway, Mail>),
        )
        .route(
            "/getcampaign/{id}",
            get(campaigns::get_campaign::<Store, Gateway, Mail>),
        )
        .with_state(state.clone());

    let admin = Router::new()
        .route(
            "/approve/{request_id}",
            patch(campaigns::update_withdrawal::<Store, Gateway, Mail>),
        )
        .route(
            "/deletecampaign/{id}",
            delete(campaigns::delete_campaign::<Store, Gateway, Mail>),
        )
        .route_layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        .route("/", get(campaigns::ping))
        .route(
            "/allrequest",
            get(campaigns::list_withdrawals::<Store, Gateway, Mail>),
        )
        .route(
            "/request/{campaign_id}",
            post(campaigns::create_withdrawal::<Store, Gateway, Mail>),
        )
        .route(
            "/getallcomments",
            get(campaigns::list_comments::<Store, Gateway, Mail>),
        )
        .route(
            "/postcampaign",
            post(campaigns::create_campaign::<Store, Gateway, Mail>),
        )
        .route(
            "/postcomment",
            post(campaigns::post_comment::<Store, Gateway, Mail>),
        )
        .route(
            "/postdraft/{campaign_id}",
            post(campaigns::publish_draft::<Store, Gateway, Mail>),
        )
        .route(
            "/campaigns",
            get(campaigns::campaigns_by_interval::<Store, Gateway, Mail>),
        )
        .route(
            "/campaign",
            get(campaigns::campaigns_by_category::<Store, Gateway, Mail>),
        )
        .route(
            "/close/{id}",
            patch(campaigns::close_campaign::<Store, Gateway, Mail>),
        )
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            auth,
            require_auth::<PgAuthRepository>,
        ))
        .with_state(state);

    public.merge(protected)
}

/// Create the Donation router (`/api/v1/donation`)
pub fn donation_router(state: State, auth: AuthState) -> Router {
    let public = Router::new()
        .route(
            "/visitordonation/{campaign_id}",
            put(donations::visitor_donation::<Store, Gateway, Mail>),
        )
        .route(
            "/verify/visitor",
            post(donations::verify_donation::<Store, Gateway, Mail>),
        )
        .with_state(state.clone());

    let admin = Router::new()
        .route(
            "/deletedonation/{id}",
            delete(donations::delete_donation::<Store, Gateway, Mail>),
        )
        .route_layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        .route("/", get(donations::ping))
        .route(
            "/getdonations",
            get(donations::list_donations::<Store, Gateway, Mail>),
        )
        .route(
            "/donations",
            get(donations::donations_by_interval::<Store, Gateway, Mail>),
        )
        .route(
            "/postdonations/{campaign_id}",
            put(donations::make_donation::<Store, Gateway, Mail>),
        )
        .route(
            "/postdonationcase/{case_id}",
            put(donations::case_donation::<Store, Gateway, Mail>),
        )
        .route(
            "/verify",
            post(donations::verify_donation::<Store, Gateway, Mail>),
        )
        .route(
            "/verify/case",
            post(donations::verify_donation::<Store, Gateway, Mail>),
        )
        .route(
            "/recurring/{campaign_id}",
            post(donations::recurring_donation::<Store, Gateway, Mail>),
        )
        .route(
            "/getdonation/{id}",
            get(donations::get_donation::<Store, Gateway, Mail>),
        )
        .route(
            "/total/{public_id}",
            get(donations::user_totals::<Store, Gateway, Mail>),
        )
        .route(
            "/users/{public_id}/cases/{case_id}/donations/total",
            get(donations::user_case_total::<Store, Gateway, Mail>),
        )
        .route(
            "/users/{public_id}/campaign/{campaign_id}/donations/total",
            get(donations::user_campaign_total::<Store, Gateway, Mail>),
        )
        .route(
            "/last/{public_id}",
            get(donations::last_donation::<Store, Gateway, Mail>),
        )
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            auth,
            require_auth::<PgAuthRepository>,
        ))
        .with_state(state);

    public.merge(protected)
}

/// Create the Case router (`/api/v1/case`)
pub fn case_router(state: State, auth: AuthState) -> Router {
    let admin = Router::new()
        .route("/", get(cases::ping))
        .route(
            "/postcase",
            post(cases::create_case::<Store, Gateway, Mail>),
        )
        .route(
            "/editcase/{id}",
            put(cases::edit_case::<Store, Gateway, Mail>),
        )
        .route(
            "/deletecase/{id}",
            delete(cases::delete_case::<Store, Gateway, Mail>),
        )
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/getcases", get(cases::list_cases::<Store, Gateway, Mail>))
        .route(
            "/getcase/{id}",
            get(cases::get_case::<Store, Gateway, Mail>),
        )
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            auth,
            require_auth::<PgAuthRepository>,
        ))
        .with_state(state)
}

/// Moderation and activity routes merged into `/api/v1/user`
pub fn moderation_router(state: State, auth: AuthState) -> Router {
    let admin = Router::new()
        .route(
            "/admin/approve/{campaign_id}",
            put(campaigns::moderate_campaign::<Store, Gateway, Mail>),
        )
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route(
            "/campaigns",
            get(campaigns::campaigns_by_status::<Store, Gateway, Mail>),
        )
        .route(
            "/activities",
            get(campaigns::activities::<Store, Gateway, Mail>),
        )
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            auth,
            require_auth::<PgAuthRepository>,
        ))
        .with_state(state)
}
