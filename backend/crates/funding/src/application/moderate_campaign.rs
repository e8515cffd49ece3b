//! Campaign Status Transitions
//!
//! Moderation (admin approve/decline), draft publishing, closing and
//! deletion.

use std::sync::Arc;

use auth::models::user_id::UserId;

use crate::domain::entity::campaign::Campaign;
use crate::domain::repository::CampaignRepository;
use crate::domain::value_object::ids::CampaignId;
use crate::error::{FundingError, FundingResult};

/// Moderation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Decline,
}

impl ModerationAction {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approve" => Some(Self::Approve),
            "decline" => Some(Self::Decline),
            _ => None,
        }
    }
}

/// Campaign status transition use case
pub struct ModerateCampaignUseCase<R>
where
    R: CampaignRepository,
{
    repo: Arc<R>,
}

impl<R> ModerateCampaignUseCase<R>
where
    R: CampaignRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Admin decision on a pending campaign
    pub async fn moderate(
        &self,
        campaign_id: &CampaignId,
        action: ModerationAction,
    ) -> FundingResult<Campaign> {
        let mut campaign = self.load(campaign_id).await?;

        if !campaign.moderate(action == ModerationAction::Approve) {
            return Err(FundingError::CampaignNotModeratable);
        }

        self.repo.update_campaign(&campaign).await?;

        tracing::info!(
            campaign_id = %campaign.campaign_id,
            status = %campaign.status,
            "Campaign moderated"
        );

        Ok(campaign)
    }

    /// Owner publishes a saved draft
    pub async fn publish_draft(
        &self,
        campaign_id: &CampaignId,
        requester: &UserId,
        requester_is_admin: bool,
    ) -> FundingResult<Campaign> {
        let mut campaign = self.load(campaign_id).await?;

        if campaign.owner_id != *requester && !requester_is_admin {
            return Err(FundingError::NotOwner);
        }

        if !campaign.publish() {
            return Err(FundingError::CampaignNotDraft);
        }

        self.repo.update_campaign(&campaign).await?;

        tracing::info!(campaign_id = %campaign.campaign_id, "Draft campaign published");

        Ok(campaign)
    }

    /// Owner or admin closes the campaign to further donations
    pub async fn close(
        &self,
        campaign_id: &CampaignId,
        requester: &UserId,
        requester_is_admin: bool,
    ) -> FundingResult<Campaign> {
        let mut campaign = self.load(campaign_id).await?;

        if campaign.owner_id != *requester && !requester_is_admin {
            return Err(FundingError::NotOwner);
        }

        campaign.close();
        self.repo.update_campaign(&campaign).await?;

        tracing::info!(campaign_id = %campaign.campaign_id, "Campaign closed");

        Ok(campaign)
    }

    /// Admin deletes a campaign outright
    pub async fn delete(&self, campaign_id: &CampaignId) -> FundingResult<()> {
        if !self.repo.delete_campaign(campaign_id).await? {
            return Err(FundingError::CampaignNotFound);
        }

        tracing::info!(campaign_id = %campaign_id, "Campaign deleted");

        Ok(())
    }

    async fn load(&self, campaign_id: &CampaignId) -> FundingResult<Campaign> {
        self.repo
            .campaign_by_id(campaign_id)
            .await?
            .ok_or(FundingError::CampaignNotFound)
    }
}
