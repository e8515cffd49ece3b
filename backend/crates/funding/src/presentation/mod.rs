//! Funding Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod campaigns;
pub mod cases;
pub mod donations;
pub mod dto;
pub mod router;

use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::FundingConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::FundingStore;

/// Gateway bound usable in handler state
pub trait AppGateway: PaymentGateway + Clone + Send + Sync + 'static {}
impl<T> AppGateway for T where T: PaymentGateway + Clone + Send + Sync + 'static {}

/// Mailer bound usable in handler state
pub trait AppMailer: Mailer + Clone + Send + Sync + 'static {}
impl<T> AppMailer for T where T: Mailer + Clone + Send + Sync + 'static {}

/// Shared state for funding handlers
#[derive(Clone)]
pub struct FundingAppState<R, G, M>
where
    R: FundingStore,
    G: AppGateway,
    M: AppMailer,
{
    pub repo: Arc<R>,
    pub gateway: Arc<G>,
    pub mailer: Arc<M>,
    pub config: Arc<FundingConfig>,
}
