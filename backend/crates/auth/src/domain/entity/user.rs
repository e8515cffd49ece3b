//! User Entity
//!
//! Core user profile entity. Sensitive auth data (password hash,
//! one-time codes) lives in the Credentials entity.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, gender::Gender, public_id::PublicId, user_id::UserId,
    user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Public-facing nanoid identifier (URL-safe)
    pub public_id: PublicId,
    /// Display name
    pub name: DisplayName,
    /// Email address (unique, used for login)
    pub email: Email,
    /// Role (Individual, Sponsor, Admin)
    pub role: UserRole,
    /// Optional profile: gender
    pub gender: Option<Gender>,
    /// Optional profile: phone number
    pub phone: Option<String>,
    /// Whether the user finished setting up their profile
    pub profile_set: bool,
    /// Whether the email address was verified with a one-time code
    pub is_active: bool,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Whitelisted profile fields a user may change about themselves
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
    pub name: Option<DisplayName>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub profile_set: Option<bool>,
}

impl User {
    /// Create a new, not-yet-verified user
    pub fn new(name: DisplayName, email: Email, role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            public_id: PublicId::new(),
            name,
            email,
            role,
            gender: None,
            phone: None,
            profile_set: false,
            is_active: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the account as verified
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Apply a profile update
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(profile_set) = update.profile_set {
            self.profile_set = profile_set;
        }
        self.updated_at = Utc::now();
    }
}
