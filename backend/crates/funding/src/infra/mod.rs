//! Funding Infrastructure Layer
//!
//! Database implementation and the Paystack gateway client.

pub mod paystack;
pub mod postgres;
