//! Subscription Plan Value Object
//!
//! Billing interval for recurring donations.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Monthly = 0,
    Quarterly = 1,
    Yearly = 2,
}

impl SubscriptionPlan {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Monthly),
            1 => Some(Self::Quarterly),
            2 => Some(Self::Yearly),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for plan in [
            SubscriptionPlan::Monthly,
            SubscriptionPlan::Quarterly,
            SubscriptionPlan::Yearly,
        ] {
            assert_eq!(SubscriptionPlan::from_id(plan.id()), Some(plan));
            assert_eq!(SubscriptionPlan::from_code(plan.code()), Some(plan));
        }
        assert_eq!(SubscriptionPlan::from_code("weekly"), None);
    }
}
