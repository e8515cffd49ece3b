//! Issue One-Time Code Use Case
//!
//! Issues (or re-issues) an emailed one-time code, for account
//! verification or password reset. Issuance is rate limited per email
//! address; a code that cannot be delivered is rolled back.

use std::sync::Arc;

use platform::mailer::{EmailMessage, Mailer};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialsRepository, OtpThrottleRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// What the code will be used for (changes the email copy)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    AccountVerification,
    PasswordReset,
}

/// Issue code use case
pub struct IssueCodeUseCase<U, C, T, M>
where
    U: UserRepository,
    C: CredentialsRepository,
    T: OtpThrottleRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    throttle_repo: Arc<T>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, C, T, M> IssueCodeUseCase<U, C, T, M>
where
    U: UserRepository,
    C: CredentialsRepository,
    T: OtpThrottleRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        credentials_repo: Arc<C>,
        throttle_repo: Arc<T>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credentials_repo,
            throttle_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, email: &str, purpose: CodePurpose) -> AuthResult<()> {
        let email = Email::new(email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if purpose == CodePurpose::AccountVerification && user.is_active {
            return Err(AuthError::AlreadyVerified);
        }

        let limit = self
            .throttle_repo
            .check_and_increment(email.as_str(), &self.config.otp_rate_limit)
            .await?;
        if !limit.allowed {
            tracing::warn!(email = %email, "One-time code issuance throttled");
            return Err(AuthError::TooManyCodeRequests);
        }

        let mut credentials = self
            .credentials_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        let code = credentials.issue_code();
        self.credentials_repo.update(&credentials).await?;

        let message = code_email(&user, code.as_str(), purpose);
        if let Err(e) = self.mailer.send(&message).await {
            // Roll the code back so a stale code can't linger unsent
            credentials.clear_code();
            self.credentials_repo.update(&credentials).await?;
            return Err(e.into());
        }

        tracing::info!(
            public_id = %user.public_id,
            purpose = ?purpose,
            "One-time code issued"
        );

        Ok(())
    }
}

fn code_email(user: &User, code: &str, purpose: CodePurpose) -> EmailMessage {
    match purpose {
        CodePurpose::AccountVerification => EmailMessage::new(
            user.email.as_str(),
            "Verification code 🚀",
            format!(
                "Hi there {}!<br/>Here's a new code to verify your account: <b>{}</b>",
                user.name, code
            ),
        ),
        CodePurpose::PasswordReset => EmailMessage::new(
            user.email.as_str(),
            "Forgot password",
            format!(
                "Hi {},<br/>We heard you are having problems with your password. \
                 Here is your verification code: <b>{}</b><br/>\
                 The code expires in 10 minutes.",
                user.name, code
            ),
        ),
    }
}
