use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
///
/// - `Individual` - regular user raising or donating funds
/// - `Sponsor` - NGO/organization account
/// - `Admin` - platform operator; moderates campaigns and withdrawals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Individual = 0,
    Sponsor = 1,
    Admin = 2,
}

impl UserRole {
    /// Roles accepted by the regular login entry point
    pub const MEMBER_ROLES: &'static [UserRole] = &[UserRole::Individual, UserRole::Sponsor];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Sponsor => "sponsor",
            Self::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    #[inline]
    pub const fn is_member(&self) -> bool {
        matches!(self, Self::Individual | Self::Sponsor)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Individual),
            1 => Some(Self::Sponsor),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "individual" => Some(Self::Individual),
            "sponsor" => Some(Self::Sponsor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(UserRole::from_id(0), Some(UserRole::Individual));
        assert_eq!(UserRole::from_id(1), Some(UserRole::Sponsor));
        assert_eq!(UserRole::from_id(2), Some(UserRole::Admin));
        assert_eq!(UserRole::from_id(9), None);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(UserRole::from_code("individual"), Some(UserRole::Individual));
        assert_eq!(UserRole::from_code("sponsor"), Some(UserRole::Sponsor));
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("root"), None);
    }

    #[test]
    fn test_checks() {
        assert!(UserRole::Individual.is_member());
        assert!(UserRole::Sponsor.is_member());
        assert!(!UserRole::Admin.is_member());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Individual.is_admin());
    }

    #[test]
    fn test_display() {
        assert_eq!(UserRole::Individual.to_string(), "individual");
        assert_eq!(UserRole::Sponsor.to_string(), "sponsor");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_default_is_individual() {
        assert_eq!(UserRole::default(), UserRole::Individual);
    }
}
