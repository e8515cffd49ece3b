//! Withdrawal Request Use Case
//!
//! Creating a request (with an admin notification email) and resolving
//! it.

use std::sync::Arc;

use auth::models::user_id::UserId;
use platform::mailer::{EmailMessage, Mailer};

use crate::application::config::FundingConfig;
use crate::domain::entity::campaign::Campaign;
use crate::domain::entity::withdrawal_request::WithdrawalRequest;
use crate::domain::repository::{CampaignRepository, WithdrawalRequestRepository};
use crate::domain::value_object::{
    amount::Amount,
    ids::{CampaignId, WithdrawalRequestId},
    request_status::RequestStatus,
};
use crate::error::{FundingError, FundingResult};

/// Withdrawal request input
pub struct WithdrawalInput {
    /// Minor units
    pub amount: i64,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
}

/// Withdrawal use case
pub struct WithdrawalUseCase<R, M>
where
    R: CampaignRepository + WithdrawalRequestRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<FundingConfig>,
}

impl<R, M> WithdrawalUseCase<R, M>
where
    R: CampaignRepository + WithdrawalRequestRepository,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<FundingConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    /// Campaign owner asks to withdraw raised funds
    pub async fn create(
        &self,
        requester_id: UserId,
        campaign_id: &CampaignId,
        input: WithdrawalInput,
    ) -> FundingResult<WithdrawalRequest> {
        let campaign = self
            .repo
            .campaign_by_id(campaign_id)
            .await?
            .ok_or(FundingError::CampaignNotFound)?;

        let amount = Amount::from_minor_units(input.amount)?;

        for (field, value) in [
            ("bank name", &input.bank_name),
            ("account name", &input.account_name),
            ("account number", &input.account_number),
        ] {
            if value.trim().is_empty() {
                return Err(FundingError::bad_request(format!(
                    "Please provide the {}",
                    field
                )));
            }
        }

        let request = WithdrawalRequest::new(
            *campaign_id,
            requester_id,
            amount,
            input.bank_name.trim().to_string(),
            input.account_name.trim().to_string(),
            input.account_number.trim().to_string(),
        );
        self.repo.insert_request(&request).await?;

        // Notify the platform admin; the request stands even if the
        // email bounces
        if let Some(admin_email) = &self.config.admin_email {
            let message = admin_notification(admin_email, &campaign, &request);
            if let Err(e) = self.mailer.send(&message).await {
                tracing::warn!(
                    request_id = %request.request_id,
                    error = %e,
                    "Failed to notify admin about withdrawal request"
                );
            }
        }

        tracing::info!(
            request_id = %request.request_id,
            campaign_id = %campaign_id,
            amount = %request.amount,
            "Withdrawal request created"
        );

        Ok(request)
    }

    /// Admin resolves a pending request
    pub async fn resolve(
        &self,
        request_id: &WithdrawalRequestId,
        status_code: &str,
    ) -> FundingResult<WithdrawalRequest> {
        let decision = RequestStatus::from_code(status_code)
            .filter(RequestStatus::is_resolved)
            .ok_or_else(|| FundingError::bad_request("Invalid status provided"))?;

        let mut request = self
            .repo
            .request_by_id(request_id)
            .await?
            .ok_or(FundingError::RequestNotFound)?;

        if !request.resolve(decision) {
            return Err(FundingError::RequestAlreadyResolved);
        }

        self.repo.update_request(&request).await?;

        tracing::info!(
            request_id = %request.request_id,
            status = %request.status,
            "Withdrawal request resolved"
        );

        Ok(request)
    }
}

fn admin_notification(
    admin_email: &str,
    campaign: &Campaign,
    request: &WithdrawalRequest,
) -> EmailMessage {
    let html = format!(
        "A withdrawal request for campaign \"{}\" has been received and is \
         pending approval.<br/><br/>\
         Amount: {}<br/>\
         Bank Name: {}<br/>\
         Account Name: {}<br/>\
         Account Number: {}",
        campaign.title, request.amount, request.bank_name, request.account_name,
        request.account_number
    );

    EmailMessage::new(admin_email, "Request for withdrawal 🚀", html)
}
