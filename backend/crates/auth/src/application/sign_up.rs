//! Sign Up Use Case
//!
//! Creates a new user account (individual or sponsor), emails the
//! activation code, and opens a first session.

use std::sync::Arc;

use platform::mailer::{EmailMessage, Mailer};

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::{auth_session::AuthSession, credentials::Credentials, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Individual or Sponsor, depending on the signup entry point
    pub role: UserRole,
}

/// Sign up output
pub struct SignUpOutput {
    pub public_id: String,
    pub session_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, C, S, M>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    session_repo: Arc<S>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, C, S, M> SignUpUseCase<U, C, S, M>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        credentials_repo: Arc<C>,
        session_repo: Arc<S>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credentials_repo,
            session_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignUpInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignUpOutput> {
        let name = DisplayName::new(input.name)?;
        let email = Email::new(input.email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(name, email, input.role);

        let mut credentials = Credentials::new(user.user_id, password_hash);
        let code = credentials.issue_code();

        self.user_repo.create(&user).await?;
        self.credentials_repo.create(&credentials).await?;

        // Activation email failure is not fatal; the user can ask for a
        // new code via /resendverification.
        let message = welcome_email(&user, code.as_str());
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(public_id = %user.public_id, error = %e, "Failed to send welcome email");
        }

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
            role = %user.role,
            "User signed up"
        );

        Ok(SignUpOutput {
            public_id: user.public_id.to_string(),
            session_token,
        })
    }
}

fn welcome_email(user: &User, code: &str) -> EmailMessage {
    let html = format!(
        "Hi {}, welcome to Fundlift 🚀<br/>\
         Before doing anything, we recommend verifying your account to use \
         most of the features available. Here is your verification code: \
         <b>{}</b>",
        user.name, code
    );

    EmailMessage::new(user.email.as_str(), "Welcome to Fundlift 🚀", html)
}
