//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User does not exist")]
    UserNotFound,

    /// Email address already registered
    #[error("The email address is already taken")]
    EmailTaken,

    /// Invalid credentials (wrong email/password combination)
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Account is locked (too many failed attempts)
    #[error("Account is temporarily locked")]
    AccountLocked,

    /// Account has not completed email verification
    #[error("Please verify your email and try again")]
    AccountNotVerified,

    /// Role is not allowed to use this entry point
    #[error("Access denied")]
    AccessDenied,

    /// Account is already verified
    #[error("Your account has already been verified")]
    AlreadyVerified,

    /// One-time code is unknown or expired
    #[error("This code has expired or is invalid")]
    CodeInvalid,

    /// New password and confirmation don't match
    #[error("New password and confirm password don't match")]
    PasswordMismatch,

    /// Too many one-time codes requested
    #[error("Too many verification codes requested, please try again later")]
    TooManyCodeRequests,

    /// Outbound email could not be delivered
    #[error("Couldn't send the email: {0}")]
    EmailDelivery(String),

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Session fingerprint mismatch
    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Input validation failure carrying its own kind (password policy etc.)
    #[error("{0}")]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::CodeInvalid
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::AccountLocked => ErrorKind::Locked,
            AuthError::AccessDenied => ErrorKind::Forbidden,
            AuthError::AccountNotVerified
            | AuthError::AlreadyVerified
            | AuthError::PasswordMismatch
            | AuthError::MissingHeader(_) => ErrorKind::BadRequest,
            AuthError::TooManyCodeRequests => ErrorKind::TooManyRequests,
            AuthError::EmailDelivery(_) => ErrorKind::ServiceUnavailable,
            AuthError::Validation(err) => err.kind(),
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, preserving the validation payload when present
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(err) => err,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::EmailDelivery(msg) => {
                tracing::error!(message = %msg, "Email delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Validation(err)
    }
}

impl From<platform::client::FingerprintError> for AuthError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AuthError::MissingHeader(header)
            }
        }
    }
}

impl From<platform::mailer::MailerError> for AuthError {
    fn from(err: platform::mailer::MailerError) -> Self {
        AuthError::EmailDelivery(err.to_string())
    }
}
