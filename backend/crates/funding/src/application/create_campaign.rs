//! Create Campaign Use Case

use std::sync::Arc;

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::entity::campaign::{Campaign, CampaignSpec};
use crate::domain::repository::CampaignRepository;
use crate::domain::value_object::{amount::Amount, category::FundraisingCategory};
use crate::error::{FundingError, FundingResult};

/// Create campaign input
pub struct CreateCampaignInput {
    pub state: Option<String>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub target_amount: i64,
    pub medical_report: Option<String>,
    pub media: Vec<String>,
    pub sponsor: Option<String>,
    pub save_as_draft: bool,
}

/// Create campaign use case
pub struct CreateCampaignUseCase<R>
where
    R: CampaignRepository,
{
    repo: Arc<R>,
}

impl<R> CreateCampaignUseCase<R>
where
    R: CampaignRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner_id: UserId,
        input: CreateCampaignInput,
    ) -> FundingResult<Campaign> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(FundingError::bad_request("Please provide a campaign title"));
        }

        let description = input.description.trim().to_string();
        if description.is_empty() {
            return Err(FundingError::bad_request(
                "Please provide a campaign description",
            ));
        }

        let category = FundraisingCategory::from_code(&input.category).ok_or_else(|| {
            FundingError::bad_request("Invalid type of fundraising")
        })?;

        let target_amount = Amount::from_minor_units(input.target_amount)?;

        if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
            if end <= start {
                return Err(FundingError::bad_request("End date must be after start date"));
            }
        }

        let campaign = Campaign::new(
            owner_id,
            CampaignSpec {
                state: input.state,
                category,
                title,
                description,
                start_date: input.start_date,
                end_date: input.end_date,
                target_amount,
                medical_report: input.medical_report,
                media: input.media,
                sponsor: input.sponsor,
                save_as_draft: input.save_as_draft,
            },
        );

        self.repo.insert_campaign(&campaign).await?;

        tracing::info!(
            campaign_id = %campaign.campaign_id,
            owner_id = %owner_id,
            status = %campaign.status,
            "Campaign created"
        );

        Ok(campaign)
    }
}
