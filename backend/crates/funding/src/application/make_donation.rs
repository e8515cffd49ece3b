//! Make Donation Use Case
//!
//! Creates an unverified donation and initializes the payment with the
//! gateway. Covers member, visitor, case and recurring donations - the
//! target and optional donor/plan are the only differences.
//!
//! No totals are touched here: a donation only counts once its
//! reference is verified.

use std::sync::Arc;

use auth::models::email::Email;
use auth::models::user_id::UserId;

use crate::domain::entity::donation::Donation;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::{CampaignRepository, CaseRepository, DonationRepository};
use crate::domain::value_object::{
    amount::Amount, donation_target::DonationTarget, subscription_plan::SubscriptionPlan,
};
use crate::error::{FundingError, FundingResult};

/// Make donation input
pub struct MakeDonationInput {
    /// None for visitor donations
    pub donor_id: Option<UserId>,
    pub target: DonationTarget,
    /// Minor units
    pub amount: i64,
    /// Payer email, forwarded to the gateway
    pub email: String,
    /// Present for recurring donations
    pub subscription_plan: Option<SubscriptionPlan>,
}

/// Make donation output
pub struct MakeDonationOutput {
    pub donation: Donation,
    pub authorization_url: String,
    pub reference: String,
    /// Target's verified total so far
    pub amount_raised: i64,
    /// Remaining to target; None for case donations
    pub amount_remaining: Option<i64>,
}

/// Make donation use case
pub struct MakeDonationUseCase<R, G>
where
    R: CampaignRepository + CaseRepository + DonationRepository,
    G: PaymentGateway,
{
    repo: Arc<R>,
    gateway: Arc<G>,
}

impl<R, G> MakeDonationUseCase<R, G>
where
    R: CampaignRepository + CaseRepository + DonationRepository,
    G: PaymentGateway,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>) -> Self {
        Self { repo, gateway }
    }

    pub async fn execute(&self, input: MakeDonationInput) -> FundingResult<MakeDonationOutput> {
        let amount = Amount::from_minor_units(input.amount)?;
        let email = Email::new(input.email)?;

        // The target must exist and accept donations
        let (amount_raised, amount_remaining) = match input.target {
            DonationTarget::Campaign(campaign_id) => {
                let campaign = self
                    .repo
                    .campaign_by_id(&campaign_id)
                    .await?
                    .ok_or(FundingError::CampaignNotFound)?;

                if !campaign.accepts_donations() {
                    return Err(FundingError::CampaignClosed);
                }

                (campaign.amount_raised, Some(campaign.amount_remaining()))
            }
            DonationTarget::Case(case_id) => {
                let case = self
                    .repo
                    .case_by_id(&case_id)
                    .await?
                    .ok_or(FundingError::CaseNotFound)?;

                (case.amount_donated, None)
            }
        };

        let mut donation = Donation::new(
            input.donor_id,
            input.target,
            amount,
            input.subscription_plan,
        );
        self.repo.insert_donation(&donation).await?;

        let initialized = self
            .gateway
            .initialize(amount, email.as_str(), &donation.donation_id)
            .await?;

        if let Some(plan) = donation.subscription_plan {
            let subscription = self
                .gateway
                .create_subscription(amount, email.as_str(), &donation.donation_id, plan)
                .await?;

            self.repo
                .set_subscription_ref(&donation.donation_id, &subscription.id)
                .await?;
            donation.subscription_ref = Some(subscription.id);
        }

        tracing::info!(
            reference = %donation.donation_id,
            target = donation.target.kind(),
            amount = %amount,
            recurring = donation.is_recurring(),
            "Donation initialized"
        );

        Ok(MakeDonationOutput {
            reference: donation.reference(),
            authorization_url: initialized.authorization_url,
            donation,
            amount_raised,
            amount_remaining,
        })
    }
}
