//! Medical Case Entity
//!
//! A simpler fundraising record opened by the platform on behalf of a
//! beneficiary. No moderation lifecycle; only admins manage cases.

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::ids::CaseId;

/// Medical case entity
#[derive(Debug, Clone)]
pub struct MedicalCase {
    pub case_id: CaseId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    /// Sum of verified donations, maintained by the verification
    /// transaction.
    pub amount_donated: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable case fields
#[derive(Debug, Default, Clone)]
pub struct CaseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl MedicalCase {
    pub fn new(owner_id: UserId, name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            case_id: CaseId::new(),
            owner_id,
            name,
            description,
            amount_donated: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: CaseUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_case() {
        let case = MedicalCase::new(
            UserId::new(),
            "Kidney transplant".to_string(),
            "Urgent transplant case".to_string(),
        );
        assert_eq!(case.amount_donated, 0);
    }

    #[test]
    fn test_apply_update() {
        let mut case = MedicalCase::new(UserId::new(), "Old".to_string(), "Desc".to_string());
        case.apply_update(CaseUpdate {
            name: Some("New".to_string()),
            description: None,
        });
        assert_eq!(case.name, "New");
        assert_eq!(case.description, "Desc");
    }
}
