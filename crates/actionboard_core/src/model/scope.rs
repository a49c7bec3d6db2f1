//! Scope identity for independent task boards.
//!
//! # Invariants
//! - `business_id` and `period_id` are trimmed and never blank.
//! - A `Scope` can only be built through `Scope::new`, so every scope that
//!   reaches a store has already been validated.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors for scope identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    BlankBusinessId,
    BlankPeriodId,
}

impl Display for ScopeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankBusinessId => write!(f, "business id must not be blank"),
            Self::BlankPeriodId => write!(f, "period id must not be blank"),
        }
    }
}

impl Error for ScopeError {}

/// `(business, period)` pair owning one task list and its persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scope {
    business_id: String,
    period_id: String,
}

impl Scope {
    /// Builds a scope from raw identifiers.
    ///
    /// # Errors
    /// - `ScopeError::BlankBusinessId` when `business_id` is blank after trim.
    /// - `ScopeError::BlankPeriodId` when `period_id` is blank after trim.
    pub fn new(
        business_id: impl AsRef<str>,
        period_id: impl AsRef<str>,
    ) -> Result<Self, ScopeError> {
        let business_id = business_id.as_ref().trim();
        if business_id.is_empty() {
            return Err(ScopeError::BlankBusinessId);
        }
        let period_id = period_id.as_ref().trim();
        if period_id.is_empty() {
            return Err(ScopeError::BlankPeriodId);
        }

        Ok(Self {
            business_id: business_id.to_string(),
            period_id: period_id.to_string(),
        })
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    pub fn period_id(&self) -> &str {
        &self.period_id
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.business_id, self.period_id)
    }
}
