//! Typed IDs for the funding domain
//!
//! A donation's id doubles as the payment reference handed to the
//! gateway, which is why it has a dedicated marker instead of reusing a
//! generic "record id".

use kernel::id::Id;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CampaignMarker;
pub type CampaignId = Id<CampaignMarker>;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseMarker;
pub type CaseId = Id<CaseMarker>;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DonationMarker;
pub type DonationId = Id<DonationMarker>;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentMarker;
pub type CommentId = Id<CommentMarker>;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WithdrawalRequestMarker;
pub type WithdrawalRequestId = Id<WithdrawalRequestMarker>;
