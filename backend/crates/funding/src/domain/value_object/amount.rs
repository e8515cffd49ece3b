//! Amount Value Object
//!
//! Money in integer minor units (kobo). The gateway receives these
//! values unchanged, and the ledger columns store them as BIGINT, so no
//! float arithmetic ever touches money.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positive money amount in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount, rejecting zero and negative values
    pub fn from_minor_units(value: i64) -> AppResult<Self> {
        if value <= 0 {
            return Err(AppError::bad_request("Amount must be greater than zero"));
        }
        Ok(Self(value))
    }

    /// Create from a database value (assumed already validated)
    pub fn from_db(value: i64) -> Self {
        Self(value)
    }

    /// The raw minor-unit value
    pub fn minor_units(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
