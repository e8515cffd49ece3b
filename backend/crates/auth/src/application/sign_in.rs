//! Sign In Use Case
//!
//! Authenticates a user and creates a session. The same use case backs
//! both login entry points; the caller passes the roles it accepts
//! (members for `/login`, admins for `/adminlogin`).

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, CredentialsRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    /// Public ID
    pub public_id: String,
}

/// Sign in use case
pub struct SignInUseCase<U, C, S>
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

impl<U, C, S> SignInUseCase<U, C, S>
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
        input: SignInInput,
        allowed_roles: &[UserRole],
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // This entry point only serves the given roles
        if !allowed_roles.contains(&user.role) {
            return Err(AuthError::AccessDenied);
        }

        if !user.can_login() {
            return Err(AuthError::AccountNotVerified);
        }

        let mut credentials = self
            .credentials_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        if credentials.is_locked() {
            return Err(AuthError::AccountLocked);
        }

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !credentials
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            credentials.record_failure();
            self.credentials_repo.update(&credentials).await?;
            return Err(AuthError::InvalidCredentials);
        }

        // Reset failure count and record last login
        credentials.reset_failures();
        self.credentials_repo.update(&credentials).await?;

        let mut user = user;
        user.record_login();
        self.user_repo.update(&user).await?;

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
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            public_id: user.public_id.to_string(),
        })
    }
}
