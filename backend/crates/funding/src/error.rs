//! Funding Error Types
//!
//! This module provides funding-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Funding-specific result type alias
pub type FundingResult<T> = Result<T, FundingError>;

/// Funding-specific error variants
#[derive(Debug, Error)]
pub enum FundingError {
    /// Campaign not found
    #[error("Campaign not found")]
    CampaignNotFound,

    /// Case not found
    #[error("Case not found")]
    CaseNotFound,

    /// Donation not found
    #[error("Donation not found")]
    DonationNotFound,

    /// Withdrawal request not found
    #[error("Request not found")]
    RequestNotFound,

    /// User not found (stats lookups)
    #[error("User not found")]
    UserNotFound,

    /// Donations against a closed campaign are rejected
    #[error("Cannot make a donation to a closed campaign")]
    CampaignClosed,

    /// Publishing a campaign that is not a draft
    #[error("Campaign is not a draft")]
    CampaignNotDraft,

    /// Moderating a campaign that was already approved or declined
    #[error("Campaign status cannot be updated")]
    CampaignNotModeratable,

    /// The gateway did not report the payment as successful
    #[error("Payment verification failed")]
    PaymentNotSuccessful,

    /// The reference was already verified; the target was not credited again
    #[error("Donation has already been verified")]
    DonationAlreadyVerified,

    /// Withdrawal request was already approved or rejected
    #[error("Request has already been resolved")]
    RequestAlreadyResolved,

    /// Only the owner may perform this operation
    #[error("You do not have permission to perform this action")]
    NotOwner,

    /// Payment gateway failure (network, HTTP error, rejected request)
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// Input validation failure carrying its own kind
    #[error("{0}")]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FundingError {
    /// Shortcut for 400s built from plain text
    pub fn bad_request(message: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        FundingError::Validation(AppError::bad_request(message))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FundingError::CampaignNotFound
            | FundingError::CaseNotFound
            | FundingError::DonationNotFound
            | FundingError::RequestNotFound
            | FundingError::UserNotFound => ErrorKind::NotFound,
            FundingError::CampaignClosed
            | FundingError::CampaignNotDraft
            | FundingError::CampaignNotModeratable
            | FundingError::PaymentNotSuccessful => ErrorKind::BadRequest,
            FundingError::DonationAlreadyVerified | FundingError::RequestAlreadyResolved => {
                ErrorKind::Conflict
            }
            FundingError::NotOwner => ErrorKind::Forbidden,
            FundingError::Gateway(_) => ErrorKind::BadGateway,
            FundingError::Validation(err) => err.kind(),
            FundingError::Database(_) | FundingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, preserving the validation payload when present
    pub fn into_app_error(self) -> AppError {
        match self {
            FundingError::Validation(err) => err,
            FundingError::DonationAlreadyVerified => {
                AppError::conflict("Donation has already been verified")
                    .with_action("The payment was already credited; nothing further to do")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            FundingError::Database(e) => {
                tracing::error!(error = %e, "Funding database error");
            }
            FundingError::Internal(msg) => {
                tracing::error!(message = %msg, "Funding internal error");
            }
            FundingError::Gateway(msg) => {
                tracing::error!(message = %msg, "Payment gateway error");
            }
            FundingError::DonationAlreadyVerified => {
                tracing::warn!("Replayed verification of an already-verified donation");
            }
            _ => {
                tracing::debug!(error = %self, "Funding error");
            }
        }
    }
}

impl IntoResponse for FundingError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for FundingError {
    fn from(err: AppError) -> Self {
        FundingError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            FundingError::CampaignNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            FundingError::CampaignClosed.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FundingError::DonationAlreadyVerified.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            FundingError::Gateway("down".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(FundingError::NotOwner.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_validation_preserves_kind() {
        let err: FundingError = AppError::bad_request("Invalid interval").into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
