//! Verify Donation Use Case
//!
//! The reconciliation step: ask the gateway what happened to a
//! reference, then - only on success - claim the donation and credit
//! its target in one transaction.
//!
//! Verification is idempotent from the ledger's point of view: a
//! reference can be replayed any number of times, but the target is
//! credited exactly once. Replays surface as `DonationAlreadyVerified`.

use std::sync::Arc;

use crate::domain::entity::donation::Donation;
use crate::domain::gateway::{PaymentGateway, PaymentVerification};
use crate::domain::repository::DonationRepository;
use crate::domain::value_object::ids::DonationId;
use crate::error::{FundingError, FundingResult};

/// Verify donation output
pub struct VerifyDonationOutput {
    pub donation: Donation,
    /// The target's total after crediting
    pub new_total: i64,
    /// Raw gateway data, echoed to the caller
    pub verification: PaymentVerification,
}

/// Verify donation use case
pub struct VerifyDonationUseCase<R, G>
where
    R: DonationRepository,
    G: PaymentGateway,
{
    repo: Arc<R>,
    gateway: Arc<G>,
}

impl<R, G> VerifyDonationUseCase<R, G>
where
    R: DonationRepository,
    G: PaymentGateway,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>) -> Self {
        Self { repo, gateway }
    }

    pub async fn execute(&self, reference: &str) -> FundingResult<VerifyDonationOutput> {
        let donation_id = DonationId::parse_str(reference.trim())
            .map_err(|_| FundingError::bad_request("Invalid payment reference"))?;

        let verification = self.gateway.verify(&donation_id).await?;

        if !verification.status.is_success() {
            return Err(FundingError::PaymentNotSuccessful);
        }

        let outcome = self.repo.verify_and_credit(&donation_id).await?;

        if verification.amount != outcome.donation.amount.minor_units() {
            tracing::warn!(
                reference = %donation_id,
                expected = outcome.donation.amount.minor_units(),
                collected = verification.amount,
                "Gateway-collected amount differs from donation record"
            );
        }

        tracing::info!(
            reference = %donation_id,
            target = outcome.donation.target.kind(),
            amount = %outcome.donation.amount,
            new_total = outcome.new_total,
            "Donation verified and credited"
        );

        Ok(VerifyDonationOutput {
            donation: outcome.donation,
            new_total: outcome.new_total,
            verification,
        })
    }
}
