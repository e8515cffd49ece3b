//! Funding Backend Module
//!
//! Campaigns, medical cases, donations, comments and withdrawal
//! requests, plus the payment-gateway reconciliation flow.
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository and gateway traits
//! - `application/` - Use cases
//! - `infra/` - Database implementation, Paystack gateway client
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Ledger Model
//! - A donation row is the payment reference: its id is what the
//!   gateway echoes back at verification time.
//! - A campaign's `amount_raised` (and a case's `amount_donated`) is
//!   the sum of its *verified* donations.
//! - Verification claims the donation and credits the target in one
//!   database transaction, so replaying a reference can never credit
//!   twice.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::FundingConfig;
pub use error::{FundingError, FundingResult};
pub use infra::paystack::PaystackGateway;
pub use infra::postgres::PgFundingRepository;
pub use presentation::router::{
    campaign_router, case_router, donation_router, funding_state, moderation_router,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgFundingRepository as FundingStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
