//! Password Reset Use Cases
//!
//! - [`ResetPasswordUseCase`]: reset from an emailed one-time code
//!   (forgot-password flow); invalidates existing sessions.
//! - [`UpdatePasswordUseCase`]: change the password from inside an
//!   authenticated session by proving the current one.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::application::verify_account::VerifiedOutput;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub use platform::client::ClientFingerprint;

/// Reset password input
pub struct ResetPasswordInput {
    pub code: String,
    pub password: String,
    pub password_confirm: String,
}

/// Reset password use case (forgot-password flow)
pub struct ResetPasswordUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, C, S> ResetPasswordUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credentials_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credentials_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: ResetPasswordInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<VerifiedOutput> {
        if input.password != input.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let mut credentials = self
            .credentials_repo
            .find_by_code(input.code.trim())
            .await?
            .ok_or(AuthError::CodeInvalid)?;

        if !credentials.verify_code(&input.code, self.config.code_ttl_chrono()) {
            return Err(AuthError::CodeInvalid);
        }

        let user = self
            .user_repo
            .find_by_id(&credentials.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("User not found for credentials".to_string()))?;

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        credentials.update_password(password_hash);
        credentials.clear_code();
        credentials.reset_failures();
        self.credentials_repo.update(&credentials).await?;

        // A password reset invalidates every existing session
        let deleted = self.session_repo.delete_all_for_user(&user.user_id).await?;

        let session = AuthSession::new(
            user.user_id,
            user.public_id,
            user.role,
            fingerprint.hash_vec(),
            fingerprint.ip_string(),
            fingerprint.user_agent.clone(),
            self.config.session_ttl_chrono(),
        );
        self.session_repo.create(&session).await?;

        let session_token = token::generate(&self.config.session_secret, session.session_id);

        tracing::info!(
            public_id = %user.public_id,
            sessions_invalidated = deleted,
            "Password reset"
        );

        Ok(VerifiedOutput {
            session_token,
            public_id: user.public_id.to_string(),
        })
    }
}

/// Update password use case (authenticated flow)
pub struct UpdatePasswordUseCase<C>
where
    C: CredentialsRepository,
{
    credentials_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<C> UpdatePasswordUseCase<C>
where
    C: CredentialsRepository,
{
    pub fn new(credentials_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        current_password: String,
        new_password: String,
        confirm_password: String,
    ) -> AuthResult<()> {
        if new_password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let mut credentials = self
            .credentials_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        let current =
            RawPassword::new(current_password).map_err(|_| AuthError::InvalidCredentials)?;
        if !credentials
            .password_hash
            .verify(&current, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let raw_password = RawPassword::new(new_password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        credentials.update_password(password_hash);
        self.credentials_repo.update(&credentials).await?;

        tracing::info!(user_id = %user_id, "Password updated");

        Ok(())
    }
}
