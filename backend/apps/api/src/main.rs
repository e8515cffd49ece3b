//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgAuthRepository};
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use funding::{FundingConfig, PaystackGateway, PgFundingRepository};
use platform::mailer::{AnyMailer, HttpMailer, NoopMailer};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,funding=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: expired sessions and stale OTP throttle windows.
    // Errors here should not prevent server startup.
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired_data().await {
        Ok((sessions, windows)) => {
            tracing::info!(
                sessions_deleted = sessions,
                throttle_windows_deleted = windows,
                "Auth cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth cleanup failed, continuing anyway"
            );
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = general_purpose::STANDARD.decode(&secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            session_secret: secret,
            ..AuthConfig::default()
        }
    };
    let auth_config = AuthConfig {
        password_pepper: env::var("PASSWORD_PEPPER").ok().map(String::into_bytes),
        ..auth_config
    };

    // Payment gateway
    let paystack_key = if cfg!(debug_assertions) {
        env::var("PAYSTACK_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("PAYSTACK_SECRET_KEY not set, using a placeholder test key");
            "sk_test_placeholder".to_string()
        })
    } else {
        env::var("PAYSTACK_SECRET_KEY").expect("PAYSTACK_SECRET_KEY must be set in production")
    };
    let gateway = PaystackGateway::new(paystack_key);

    // Outbound email
    let mailer = match (env::var("MAIL_API_URL"), env::var("MAIL_API_KEY")) {
        (Ok(api_url), Ok(api_key)) => {
            let from = env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Fundlift <no-reply@fundlift.example>".to_string());
            AnyMailer::Http(HttpMailer::new(api_url, api_key, from))
        }
        _ => {
            tracing::warn!("MAIL_API_URL/MAIL_API_KEY not set, emails will only be logged");
            AnyMailer::Noop(NoopMailer)
        }
    };

    let funding_config = FundingConfig {
        admin_email: env::var("ADMIN_EMAIL").ok(),
        ..FundingConfig::default()
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let funding_repo = PgFundingRepository::new(pool.clone());
    let auth_mw = auth::router::auth_middleware_state(&auth_repo, &auth_config);
    let funding_state = funding::funding_state(
        funding_repo,
        gateway,
        mailer.clone(),
        funding_config,
    );

    let user_routes = auth::user_router(auth_repo.clone(), mailer.clone(), auth_config.clone())
        .merge(funding::moderation_router(
            funding_state.clone(),
            auth_mw.clone(),
        ));

    let app = Router::new()
        .route("/", get(|| async { "Server live ⚡️" }))
        .nest(
            "/api/v1/auth",
            auth::auth_router(auth_repo.clone(), mailer.clone(), auth_config.clone()),
        )
        .nest("/api/v1/user", user_routes)
        .nest(
            "/api/v1/campaign",
            funding::campaign_router(funding_state.clone(), auth_mw.clone()),
        )
        .nest(
            "/api/v1/donation",
            funding::donation_router(funding_state.clone(), auth_mw.clone()),
        )
        .nest(
            "/api/v1/case",
            funding::case_router(funding_state, auth_mw),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
