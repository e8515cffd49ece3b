//! Manage Medical Case Use Case
//!
//! Admin-side CRUD for medical cases.

use std::sync::Arc;

use auth::models::user_id::UserId;

use crate::domain::entity::medical_case::{CaseUpdate, MedicalCase};
use crate::domain::repository::CaseRepository;
use crate::domain::value_object::ids::CaseId;
use crate::error::{FundingError, FundingResult};

/// Manage case use case
pub struct ManageCaseUseCase<R>
where
    R: CaseRepository,
{
    repo: Arc<R>,
}

impl<R> ManageCaseUseCase<R>
where
    R: CaseRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        owner_id: UserId,
        name: String,
        description: String,
    ) -> FundingResult<MedicalCase> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(FundingError::bad_request("Please provide a case name"));
        }

        let case = MedicalCase::new(owner_id, name, description.trim().to_string());
        self.repo.insert_case(&case).await?;

        tracing::info!(case_id = %case.case_id, "Case created");

        Ok(case)
    }

    pub async fn edit(&self, case_id: &CaseId, update: CaseUpdate) -> FundingResult<MedicalCase> {
        let mut case = self
            .repo
            .case_by_id(case_id)
            .await?
            .ok_or(FundingError::CaseNotFound)?;

        case.apply_update(update);
        self.repo.update_case(&case).await?;

        tracing::info!(case_id = %case.case_id, "Case updated");

        Ok(case)
    }

    pub async fn delete(&self, case_id: &CaseId) -> FundingResult<()> {
        if !self.repo.delete_case(case_id).await? {
            return Err(FundingError::CaseNotFound);
        }

        tracing::info!(case_id = %case_id, "Case deleted");

        Ok(())
    }
}
