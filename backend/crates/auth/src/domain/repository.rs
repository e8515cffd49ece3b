//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{auth_session::AuthSession, credentials::Credentials, user::User};
use crate::domain::value_object::{
    email::Email, public_id::PublicId, user_id::UserId, user_role::UserRole,
};
use crate::error::AuthResult;
use platform::rate_limit::{RateLimitConfig, RateLimitResult};
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by public ID
    async fn find_by_public_id(&self, public_id: &PublicId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete user, returning whether a row was removed
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;

    /// List users, optionally filtered by role
    async fn list(&self, role: Option<UserRole>) -> AuthResult<Vec<User>>;
}

/// Credentials repository trait
#[trait_variant::make(CredentialsRepository: Send)]
pub trait LocalCredentialsRepository {
    /// Create credentials
    async fn create(&self, credentials: &Credentials) -> AuthResult<()>;

    /// Find credentials by user ID
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credentials>>;

    /// Find the credentials currently holding a one-time code
    ///
    /// Expiry is the caller's concern; this is a plain equality lookup,
    /// matching how the original system resolves codes.
    async fn find_by_code(&self, code: &str) -> AuthResult<Option<Credentials>>;

    /// Update credentials
    async fn update(&self, credentials: &Credentials) -> AuthResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID and verify fingerprint
    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Delete all sessions for a user
    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// One-time-code issuance throttle
///
/// Fixed-window counter keyed by email address; bounds how often
/// verification/reset codes can be requested.
#[trait_variant::make(OtpThrottleRepository: Send)]
pub trait LocalOtpThrottleRepository {
    /// Count a request against the window and report whether it is allowed
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> AuthResult<RateLimitResult>;
}

/// Umbrella trait for a store implementing the full auth surface
///
/// Handlers and router state are bounded on this instead of repeating
/// the four repository traits everywhere.
pub trait AuthStore:
    UserRepository
    + CredentialsRepository
    + AuthSessionRepository
    + OtpThrottleRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository
        + CredentialsRepository
        + AuthSessionRepository
        + OtpThrottleRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
