//! Use-case tests against in-memory fakes
//!
//! Everything that doesn't need Postgres: the signup → verify → login
//! flow, lockout, role gates, one-time-code issuance and password
//! reset. The mailer fake records messages so tests can read the code
//! a user would receive.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, CodePurpose, IssueCodeUseCase, ResetPasswordInput, ResetPasswordUseCase,
    SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, UpdatePasswordUseCase,
    VerifyAccountUseCase,
};
use crate::domain::entity::{auth_session::AuthSession, credentials::Credentials, user::User};
use crate::domain::repository::{
    AuthSessionRepository, CredentialsRepository, OtpThrottleRepository, UserRepository,
};
use crate::domain::value_object::{
    email::Email, public_id::PublicId, user_id::UserId, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};
use platform::client::ClientFingerprint;
use platform::mailer::{EmailMessage, Mailer, MailerError};
use platform::rate_limit::{RateLimitConfig, RateLimitResult};

// ============================================================================
// In-memory store fake
// ============================================================================

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    credentials: HashMap<Uuid, Credentials>,
    sessions: HashMap<Uuid, AuthSession>,
    throttle: HashMap<String, u32>,
}

#[derive(Clone, Default)]
struct InMemoryAuthStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryAuthStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    fn active_code_for(&self, email: &str) -> Option<String> {
        let inner = self.lock();
        let user = inner.users.values().find(|u| u.email.as_str() == email)?;
        inner
            .credentials
            .get(user.user_id.as_uuid())
            .and_then(|c| c.one_time_code.as_ref())
            .map(|c| c.as_str().to_string())
    }

    fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }
}

impl UserRepository for InMemoryAuthStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.lock().users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.lock().users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_public_id(&self, public_id: &PublicId) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.public_id == *public_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.lock().users.values().any(|u| u.email == *email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.lock().users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        Ok(self.lock().users.remove(user_id.as_uuid()).is_some())
    }

    async fn list(&self, role: Option<UserRole>) -> AuthResult<Vec<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect())
    }
}

impl CredentialsRepository for InMemoryAuthStore {
    async fn create(&self, credentials: &Credentials) -> AuthResult<()> {
        self.lock()
            .credentials
            .insert(credentials.user_id.into_uuid(), credentials.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credentials>> {
        Ok(self.lock().credentials.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AuthResult<Option<Credentials>> {
        Ok(self
            .lock()
            .credentials
            .values()
            .find(|c| {
                c.one_time_code
                    .as_ref()
                    .is_some_and(|active| active.as_str() == code)
            })
            .cloned())
    }

    async fn update(&self, credentials: &Credentials) -> AuthResult<()> {
        self.lock()
            .credentials
            .insert(credentials.user_id.into_uuid(), credentials.clone());
        Ok(())
    }
}

impl AuthSessionRepository for InMemoryAuthStore {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.lock().sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let session = self.lock().sessions.get(&session_id).cloned();
        match session {
            Some(session) if session.client_fingerprint_hash != fingerprint_hash => {
                Err(AuthError::SessionFingerprintMismatch)
            }
            other => Ok(other),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        self.lock().sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        self.lock().sessions.remove(&session_id);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut inner = self.lock();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| s.user_id != *user_id);
        Ok((before - inner.sessions.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut inner = self.lock();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| !s.is_expired());
        Ok((before - inner.sessions.len()) as u64)
    }
}

impl OtpThrottleRepository for InMemoryAuthStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> AuthResult<RateLimitResult> {
        let mut inner = self.lock();
        let count = inner.throttle.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(RateLimitResult::from_window(*count, 0, config))
    }
}

// ============================================================================
// Recording mailer fake
// ============================================================================

#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingMailer {
    fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer mutex").clone()
    }

    fn fail_next_sends(&self) {
        *self.fail.lock().expect("mailer mutex") = true;
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        if *self.fail.lock().expect("mailer mutex") {
            return Err(MailerError::Api(500));
        }
        self.sent.lock().expect("mailer mutex").push(message.clone());
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::development())
}

fn fingerprint() -> ClientFingerprint {
    ClientFingerprint::new([1u8; 32], None, Some("test-agent".to_string()))
}

struct Harness {
    store: Arc<InMemoryAuthStore>,
    mailer: Arc<RecordingMailer>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryAuthStore::default()),
            mailer: Arc::new(RecordingMailer::default()),
            config: test_config(),
        }
    }

    fn sign_up(
        &self,
    ) -> SignUpUseCase<InMemoryAuthStore, InMemoryAuthStore, InMemoryAuthStore, RecordingMailer>
    {
        SignUpUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn sign_in(&self) -> SignInUseCase<InMemoryAuthStore, InMemoryAuthStore, InMemoryAuthStore> {
        SignInUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.config.clone(),
        )
    }

    fn verify(
        &self,
    ) -> VerifyAccountUseCase<InMemoryAuthStore, InMemoryAuthStore, InMemoryAuthStore> {
        VerifyAccountUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.config.clone(),
        )
    }

    fn issue_code(
        &self,
    ) -> IssueCodeUseCase<InMemoryAuthStore, InMemoryAuthStore, InMemoryAuthStore, RecordingMailer>
    {
        IssueCodeUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    async fn register(&self, email: &str) -> String {
        let output = self
            .sign_up()
            .execute(
                SignUpInput {
                    name: "Ada Lovelace".to_string(),
                    email: email.to_string(),
                    password: "CorrectHorse-42".to_string(),
                    role: UserRole::Individual,
                },
                fingerprint(),
            )
            .await
            .expect("signup failed");
        output.public_id
    }

    async fn register_verified(&self, email: &str) -> String {
        let public_id = self.register(email).await;
        let code = self.store.active_code_for(email).expect("no code issued");
        self.verify()
            .execute(&code, fingerprint())
            .await
            .expect("verification failed");
        public_id
    }
}

fn login_input(email: &str, password: &str) -> SignInInput {
    SignInInput {
        email: email.to_string(),
        password: password.to_string(),
    }
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn sign_up_creates_inactive_user_and_emails_code() {
    let h = Harness::new();
    h.register("ada@example.com").await;

    let email = Email::new("ada@example.com").unwrap();
    let user = h.store.find_by_email(&email).await.unwrap().unwrap();
    assert!(!user.is_active);
    assert_eq!(user.role, UserRole::Individual);

    // The welcome email carries the active code
    let code = h.store.active_code_for("ada@example.com").unwrap();
    let sent = h.mailer.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].html.contains(&code));

    // Signing up opens a first session
    assert_eq!(h.store.session_count(), 1);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let h = Harness::new();
    h.register("ada@example.com").await;

    let result = h
        .sign_up()
        .execute(
            SignUpInput {
                name: "Someone Else".to_string(),
                email: "ada@example.com".to_string(),
                password: "OtherPassword-9".to_string(),
                role: UserRole::Sponsor,
            },
            fingerprint(),
        )
        .await;

    assert!(matches!(result, Err(AuthError::EmailTaken)));
}

// ============================================================================
// Verification
// ============================================================================

#[tokio::test]
async fn login_requires_verification_first() {
    let h = Harness::new();
    h.register("ada@example.com").await;

    let result = h
        .sign_in()
        .execute(
            login_input("ada@example.com", "CorrectHorse-42"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await;

    assert!(matches!(result, Err(AuthError::AccountNotVerified)));
}

#[tokio::test]
async fn verify_activates_account_and_burns_the_code() {
    let h = Harness::new();
    h.register("ada@example.com").await;
    let code = h.store.active_code_for("ada@example.com").unwrap();

    h.verify().execute(&code, fingerprint()).await.unwrap();

    let email = Email::new("ada@example.com").unwrap();
    let user = h.store.find_by_email(&email).await.unwrap().unwrap();
    assert!(user.is_active);
    assert!(h.store.active_code_for("ada@example.com").is_none());

    // The spent code no longer resolves
    let replay = h.verify().execute(&code, fingerprint()).await;
    assert!(matches!(replay, Err(AuthError::CodeInvalid)));

    // Login now works
    h.sign_in()
        .execute(
            login_input("ada@example.com", "CorrectHorse-42"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn wrong_code_is_rejected() {
    let h = Harness::new();
    h.register("ada@example.com").await;

    let result = h.verify().execute("0000", fingerprint()).await;
    // Either no credentials hold "0000", or a clash resolves and the
    // entity check still passes - both paths end the same way for a
    // fabricated code unless it happens to be the issued one
    if h.store.active_code_for("ada@example.com").as_deref() != Some("0000") {
        assert!(matches!(result, Err(AuthError::CodeInvalid)));
    }
}

#[tokio::test]
async fn resend_is_refused_for_verified_accounts_and_throttled() {
    let h = Harness::new();
    h.register("ada@example.com").await;

    // Codes 2 and 3 within the window are fine (signup already sent one
    // email but only issue-code calls count against the throttle)
    let issue = h.issue_code();
    issue
        .execute("ada@example.com", CodePurpose::AccountVerification)
        .await
        .unwrap();
    issue
        .execute("ada@example.com", CodePurpose::AccountVerification)
        .await
        .unwrap();
    issue
        .execute("ada@example.com", CodePurpose::AccountVerification)
        .await
        .unwrap();

    let throttled = issue
        .execute("ada@example.com", CodePurpose::AccountVerification)
        .await;
    assert!(matches!(throttled, Err(AuthError::TooManyCodeRequests)));

    // A verified account cannot request verification codes at all
    let h2 = Harness::new();
    h2.register_verified("ada@example.com").await;
    let refused = h2
        .issue_code()
        .execute("ada@example.com", CodePurpose::AccountVerification)
        .await;
    assert!(matches!(refused, Err(AuthError::AlreadyVerified)));
}

#[tokio::test]
async fn undeliverable_code_is_rolled_back() {
    let h = Harness::new();
    h.register("ada@example.com").await;
    h.mailer.fail_next_sends();

    let result = h
        .issue_code()
        .execute("ada@example.com", CodePurpose::PasswordReset)
        .await;

    assert!(matches!(result, Err(AuthError::EmailDelivery(_))));
    // The failed issuance left no live code behind
    assert!(h.store.active_code_for("ada@example.com").is_none());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn lockout_after_repeated_failures() {
    let h = Harness::new();
    h.register_verified("ada@example.com").await;

    for _ in 0..Credentials::MAX_LOGIN_FAILURES {
        let attempt = h
            .sign_in()
            .execute(
                login_input("ada@example.com", "WrongPassword-1"),
                UserRole::MEMBER_ROLES,
                fingerprint(),
            )
            .await;
        assert!(matches!(attempt, Err(AuthError::InvalidCredentials)));
    }

    // Even the right password bounces while locked
    let locked = h
        .sign_in()
        .execute(
            login_input("ada@example.com", "CorrectHorse-42"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await;
    assert!(matches!(locked, Err(AuthError::AccountLocked)));
}

#[tokio::test]
async fn login_entry_points_gate_roles() {
    let h = Harness::new();
    h.register_verified("ada@example.com").await;

    // An individual cannot use the admin entry point
    let admin_door = h
        .sign_in()
        .execute(
            login_input("ada@example.com", "CorrectHorse-42"),
            &[UserRole::Admin],
            fingerprint(),
        )
        .await;
    assert!(matches!(admin_door, Err(AuthError::AccessDenied)));

    let unknown = h
        .sign_in()
        .execute(
            login_input("nobody@example.com", "CorrectHorse-42"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await;
    assert!(matches!(unknown, Err(AuthError::UserNotFound)));
}

#[tokio::test]
async fn session_token_round_trip_and_fingerprint_binding() {
    let h = Harness::new();
    h.register_verified("ada@example.com").await;

    let output = h
        .sign_in()
        .execute(
            login_input("ada@example.com", "CorrectHorse-42"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await
        .unwrap();

    let check = CheckSessionUseCase::new(h.store.clone(), h.config.clone());

    assert!(check.is_valid(&output.session_token, &fingerprint().hash).await);

    // A different client fingerprint does not resolve the session
    let other = ClientFingerprint::new([9u8; 32], None, Some("other-agent".to_string()));
    assert!(!check.is_valid(&output.session_token, &other.hash).await);

    // Garbage tokens never validate
    assert!(!check.is_valid("not-a-token", &fingerprint().hash).await);
}

// ============================================================================
// Password reset
// ============================================================================

#[tokio::test]
async fn forgot_password_reset_flow() {
    let h = Harness::new();
    h.register_verified("ada@example.com").await;
    let sessions_before = h.store.session_count();
    assert!(sessions_before > 0);

    h.issue_code()
        .execute("ada@example.com", CodePurpose::PasswordReset)
        .await
        .unwrap();
    let code = h.store.active_code_for("ada@example.com").unwrap();

    let reset = ResetPasswordUseCase::new(
        h.store.clone(),
        h.store.clone(),
        h.store.clone(),
        h.config.clone(),
    );
    reset
        .execute(
            ResetPasswordInput {
                code,
                password: "BrandNewSecret-7".to_string(),
                password_confirm: "BrandNewSecret-7".to_string(),
            },
            fingerprint(),
        )
        .await
        .unwrap();

    // Old password is dead, new one works
    let old = h
        .sign_in()
        .execute(
            login_input("ada@example.com", "CorrectHorse-42"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await;
    assert!(matches!(old, Err(AuthError::InvalidCredentials)));

    h.sign_in()
        .execute(
            login_input("ada@example.com", "BrandNewSecret-7"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_requires_matching_confirmation() {
    let h = Harness::new();
    h.register_verified("ada@example.com").await;

    let reset = ResetPasswordUseCase::new(
        h.store.clone(),
        h.store.clone(),
        h.store.clone(),
        h.config.clone(),
    );
    let result = reset
        .execute(
            ResetPasswordInput {
                code: "1234".to_string(),
                password: "BrandNewSecret-7".to_string(),
                password_confirm: "Different-7".to_string(),
            },
            fingerprint(),
        )
        .await;

    assert!(matches!(result, Err(AuthError::PasswordMismatch)));
}

#[tokio::test]
async fn update_password_checks_the_current_one() {
    let h = Harness::new();
    h.register_verified("ada@example.com").await;

    let email = Email::new("ada@example.com").unwrap();
    let user = h.store.find_by_email(&email).await.unwrap().unwrap();

    let update = UpdatePasswordUseCase::new(h.store.clone(), h.config.clone());

    let wrong = update
        .execute(
            &user.user_id,
            "NotMyPassword-1".to_string(),
            "BrandNewSecret-7".to_string(),
            "BrandNewSecret-7".to_string(),
        )
        .await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    update
        .execute(
            &user.user_id,
            "CorrectHorse-42".to_string(),
            "BrandNewSecret-7".to_string(),
            "BrandNewSecret-7".to_string(),
        )
        .await
        .unwrap();

    h.sign_in()
        .execute(
            login_input("ada@example.com", "BrandNewSecret-7"),
            UserRole::MEMBER_ROLES,
            fingerprint(),
        )
        .await
        .unwrap();
}
