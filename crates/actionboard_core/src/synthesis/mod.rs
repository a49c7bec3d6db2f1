//! Insight-to-task synthesis.
//!
//! # Responsibility
//! - Classify insight text into themes and estimate impact/effort.
//! - Suppress near-duplicate insights within one batch.
//! - Build task candidates and reconcile them with persisted tasks.
//!
//! # Invariants
//! - Every function here is pure over its inputs except id generation.
//! - Classification and estimation are total: they never fail.

pub mod classify;
pub mod dedupe;
pub mod estimate;
pub mod synthesizer;
