//! Synthesis configuration.
//!
//! # Invariants
//! - Caps are non-zero and their sum never exceeds `MAX_TOTAL_CANDIDATES`,
//!   which keeps every synthesis run bounded.
//! - `imperative_verb` is a single non-blank word.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hard bound on recommendation + improvement candidates per run.
pub const MAX_TOTAL_CANDIDATES: usize = 10;

const DEFAULT_RECOMMENDATION_CAP: usize = 3;
const DEFAULT_IMPROVEMENT_CAP: usize = 3;
const DEFAULT_DEDUPE_PREFIX_LEN: usize = 20;
const DEFAULT_IMPERATIVE_VERB: &str = "Improve";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A per-group cap is zero.
    ZeroCap(&'static str),
    /// `recommendation_cap + improvement_cap` exceeds the hard bound.
    CapsTooLarge { total: usize, max: usize },
    /// Dedupe prefix length is zero.
    ZeroPrefixLength,
    /// Imperative verb is blank or contains whitespace.
    InvalidVerb(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCap(field) => write!(f, "{field} must be greater than zero"),
            Self::CapsTooLarge { total, max } => {
                write!(f, "candidate caps total {total} exceeds maximum {max}")
            }
            Self::ZeroPrefixLength => write!(f, "dedupe_prefix_len must be greater than zero"),
            Self::InvalidVerb(value) => {
                write!(f, "imperative_verb must be a single word, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Tunables for `TaskSynthesizer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Maximum recommendations turned into tasks (K1).
    pub recommendation_cap: usize,
    /// Maximum improvements turned into tasks (K2).
    pub improvement_cap: usize,
    /// Characters compared by the near-duplicate filter.
    pub dedupe_prefix_len: usize,
    /// Verb that marks an improvement as already imperative, and the prefix
    /// used to rewrite the ones that are not.
    pub imperative_verb: String,
    /// Keep prior tasks a refresh no longer produces in the persisted
    /// snapshot, after the merged set.
    pub retain_superseded: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            recommendation_cap: DEFAULT_RECOMMENDATION_CAP,
            improvement_cap: DEFAULT_IMPROVEMENT_CAP,
            dedupe_prefix_len: DEFAULT_DEDUPE_PREFIX_LEN,
            imperative_verb: DEFAULT_IMPERATIVE_VERB.to_string(),
            retain_superseded: false,
        }
    }
}

impl SynthesisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recommendation_cap == 0 {
            return Err(ConfigError::ZeroCap("recommendation_cap"));
        }
        if self.improvement_cap == 0 {
            return Err(ConfigError::ZeroCap("improvement_cap"));
        }
        let total = self.recommendation_cap.saturating_add(self.improvement_cap);
        if total > MAX_TOTAL_CANDIDATES {
            return Err(ConfigError::CapsTooLarge {
                total,
                max: MAX_TOTAL_CANDIDATES,
            });
        }
        if self.dedupe_prefix_len == 0 {
            return Err(ConfigError::ZeroPrefixLength);
        }
        let verb = self.imperative_verb.as_str();
        if verb.is_empty() || verb.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidVerb(self.imperative_verb.clone()));
        }
        Ok(())
    }
}
