//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// Sign up request (individual and sponsor entry points)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub public_id: String,
}

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub public_id: String,
}

// ============================================================================
// One-time codes
// ============================================================================

/// Verify account request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAccountRequest {
    pub code: String,
}

/// Resend verification / forgot password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub email: String,
}

/// Reset password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub code: String,
    pub password: String,
    pub password_confirm: String,
}

/// Update password request (authenticated)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

// ============================================================================
// Session
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub public_id: Option<String>,
    pub role: Option<String>,
    pub expires_at_ms: Option<i64>,
}

// ============================================================================
// Generic message envelope
// ============================================================================

/// Simple success/message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// ============================================================================
// User profile
// ============================================================================

/// User profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub public_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub profile_set: bool,
    pub is_active: bool,
    pub last_login_at: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            public_id: user.public_id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
            gender: user.gender.map(|g| g.code().to_string()),
            phone: user.phone.clone(),
            profile_set: user.profile_set,
            is_active: user.is_active,
            last_login_at: user.last_login_at.map(|t| t.timestamp_millis()),
            created_at: user.created_at,
        }
    }
}

/// User list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub len: usize,
    pub data: Vec<UserResponse>,
}

/// Edit profile request (whitelisted fields only)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub profile_set: Option<bool>,
}

/// Query for the admin user listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersQuery {
    pub role: Option<String>,
}
