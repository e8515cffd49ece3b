//! Verify Account Use Case
//!
//! Activates an account from an emailed one-time code and opens a
//! session for the now-verified user.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, CredentialsRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub use platform::client::ClientFingerprint;

/// Output shared with the reset-password flow: a fresh session
pub struct VerifiedOutput {
    pub session_token: String,
    pub public_id: String,
}

/// Verify account use case
pub struct VerifyAccountUseCase<U, C, S>
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

impl<U, C, S> VerifyAccountUseCase<U, C, S>
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
        code: &str,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<VerifiedOutput> {
        let mut credentials = self
            .credentials_repo
            .find_by_code(code.trim())
            .await?
            .ok_or(AuthError::CodeInvalid)?;

        // Re-check through the entity: covers expiry
        if !credentials.verify_code(code, self.config.code_ttl_chrono()) {
            return Err(AuthError::CodeInvalid);
        }

        let mut user = self
            .user_repo
            .find_by_id(&credentials.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("User not found for credentials".to_string()))?;

        if user.is_active {
            // Spent code on an already-verified account: burn it
            credentials.clear_code();
            self.credentials_repo.update(&credentials).await?;
            return Err(AuthError::AlreadyVerified);
        }

        user.activate();
        self.user_repo.update(&user).await?;

        credentials.clear_code();
        self.credentials_repo.update(&credentials).await?;

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

        tracing::info!(public_id = %user.public_id, "Account verified");

        Ok(VerifiedOutput {
            session_token,
            public_id: user.public_id.to_string(),
        })
    }
}
