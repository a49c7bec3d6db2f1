//! Domain model for synthesized action items.
//!
//! # Responsibility
//! - Define the task record shared by synthesis, lifecycle and storage.
//! - Define the scope identity and the insight input contract.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` within its scope.
//! - Tasks are never hard-deleted by core; re-synthesis only supersedes them.

pub mod insight;
pub mod scope;
pub mod task;
pub mod theme;
