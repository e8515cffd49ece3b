//! Fundraising Category Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a campaign is raising money for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum FundraisingCategory {
    Cancer = 0,
    Diabetes = 1,
    Surgery = 2,
    OrganTransplant = 3,
    Injury = 4,
    Others = 5,
}

impl FundraisingCategory {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// API spelling, including the space in "Organ transplant"
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cancer => "Cancer",
            Self::Diabetes => "Diabetes",
            Self::Surgery => "Surgery",
            Self::OrganTransplant => "Organ transplant",
            Self::Injury => "Injury",
            Self::Others => "Others",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Cancer),
            1 => Some(Self::Diabetes),
            2 => Some(Self::Surgery),
            3 => Some(Self::OrganTransplant),
            4 => Some(Self::Injury),
            5 => Some(Self::Others),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Cancer" => Some(Self::Cancer),
            "Diabetes" => Some(Self::Diabetes),
            "Surgery" => Some(Self::Surgery),
            "Organ transplant" => Some(Self::OrganTransplant),
            "Injury" => Some(Self::Injury),
            "Others" => Some(Self::Others),
            _ => None,
        }
    }
}

impl fmt::Display for FundraisingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for category in [
            FundraisingCategory::Cancer,
            FundraisingCategory::Diabetes,
            FundraisingCategory::Surgery,
            FundraisingCategory::OrganTransplant,
            FundraisingCategory::Injury,
            FundraisingCategory::Others,
        ] {
            assert_eq!(FundraisingCategory::from_id(category.id()), Some(category));
            assert_eq!(
                FundraisingCategory::from_code(category.code()),
                Some(category)
            );
        }
        assert_eq!(FundraisingCategory::from_code("organ transplant"), None);
    }
}
