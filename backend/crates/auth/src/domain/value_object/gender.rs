//! Gender Value Object
//!
//! Optional profile attribute with the two values the product collects.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male = 0,
    Female = 1,
}

impl Gender {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Male),
            1 => Some(Self::Female),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        assert_eq!(Gender::from_id(0), Some(Gender::Male));
        assert_eq!(Gender::from_id(1), Some(Gender::Female));
        assert_eq!(Gender::from_id(2), None);
        assert_eq!(Gender::from_code("male"), Some(Gender::Male));
        assert_eq!(Gender::from_code("female"), Some(Gender::Female));
        assert_eq!(Gender::from_code("other"), None);
        assert_eq!(Gender::Male.to_string(), "male");
    }
}
