//! Campaign Status Value Object
//!
//! Lifecycle: Draft → Pending → Approved | Declined, with Closed as the
//! terminal state an owner or admin can move an approved campaign into.
//! Codes keep the capitalized spelling the API has always used.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum CampaignStatus {
    #[default]
    Pending = 0,
    Approved = 1,
    Declined = 2,
    Closed = 3,
    Draft = 4,
}

impl CampaignStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Declined => "Declined",
            Self::Closed => "Closed",
            Self::Draft => "Draft",
        }
    }

    /// Closed campaigns stop accepting donations; everything else takes them
    #[inline]
    pub const fn accepts_donations(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Moderation may only touch campaigns not already approved/declined
    #[inline]
    pub const fn is_moderatable(&self) -> bool {
        !matches!(self, Self::Approved | Self::Declined)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Declined),
            3 => Some(Self::Closed),
            4 => Some(Self::Draft),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Pending" => Some(Self::Pending),
            "Approved" => Some(Self::Approved),
            "Declined" => Some(Self::Declined),
            "Closed" => Some(Self::Closed),
            "Draft" => Some(Self::Draft),
            _ => None,
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for status in [
            CampaignStatus::Pending,
            CampaignStatus::Approved,
            CampaignStatus::Declined,
            CampaignStatus::Closed,
            CampaignStatus::Draft,
        ] {
            assert_eq!(CampaignStatus::from_id(status.id()), Some(status));
            assert_eq!(CampaignStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(CampaignStatus::from_id(9), None);
        assert_eq!(CampaignStatus::from_code("pending"), None);
    }

    #[test]
    fn test_accepts_donations() {
        assert!(CampaignStatus::Pending.accepts_donations());
        assert!(CampaignStatus::Approved.accepts_donations());
        assert!(!CampaignStatus::Closed.accepts_donations());
    }

    #[test]
    fn test_is_moderatable() {
        assert!(CampaignStatus::Pending.is_moderatable());
        assert!(CampaignStatus::Draft.is_moderatable());
        assert!(CampaignStatus::Closed.is_moderatable());
        assert!(!CampaignStatus::Approved.is_moderatable());
        assert!(!CampaignStatus::Declined.is_moderatable());
    }
}
