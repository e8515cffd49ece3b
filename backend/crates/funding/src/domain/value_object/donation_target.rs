//! Donation Target Value Object
//!
//! A donation credits a campaign or a medical case, never both. The
//! enum makes the exclusive-or structural; the database mirrors it with
//! a pair of nullable foreign keys and a CHECK constraint.

use uuid::Uuid;

use crate::domain::value_object::ids::{CampaignId, CaseId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationTarget {
    Campaign(CampaignId),
    Case(CaseId),
}

impl DonationTarget {
    /// Campaign FK column value
    pub fn campaign_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Campaign(id) => Some(id.into_uuid()),
            Self::Case(_) => None,
        }
    }

    /// Case FK column value
    pub fn case_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Campaign(_) => None,
            Self::Case(id) => Some(id.into_uuid()),
        }
    }

    /// Rebuild from the FK column pair
    ///
    /// Returns `None` when the row violates the exclusive-or (which the
    /// CHECK constraint should make impossible).
    pub fn from_columns(campaign: Option<Uuid>, case: Option<Uuid>) -> Option<Self> {
        match (campaign, case) {
            (Some(id), None) => Some(Self::Campaign(CampaignId::from_uuid(id))),
            (None, Some(id)) => Some(Self::Case(CaseId::from_uuid(id))),
            _ => None,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Campaign(_) => "campaign",
            Self::Case(_) => "case",
        }
    }
}
