//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical action-item record produced by synthesis.
//! - Provide pure lifecycle commands that return updated records.
//!
//! # Invariants
//! - `id` is stable and never reused for another task in the same scope.
//! - `progress` stays within `0..=100`; adjustments clamp.
//! - `status` advances along `Backlog -> InProgress -> InReview -> Done`
//!   and wraps back to `Backlog`.
//! - `due_at` is never assigned by core.

use crate::model::theme::ThemeCategory;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task within its scope.
pub type TaskId = Uuid;

/// Upper bound for `Task::progress`.
pub const MAX_PROGRESS: u8 = 100;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Synthesized, not started.
    Backlog,
    /// Work is in progress.
    InProgress,
    /// Waiting for review.
    InReview,
    /// Completed. Not terminal: advancing wraps to `Backlog`.
    Done,
}

impl TaskStatus {
    /// Statuses in cycle order.
    pub const CYCLE: [TaskStatus; 4] = [
        TaskStatus::Backlog,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    /// Returns the next status in the cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Backlog => Self::InProgress,
            Self::InProgress => Self::InReview,
            Self::InReview => Self::Done,
            Self::Done => Self::Backlog,
        }
    }

    /// Stable storage/wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "backlog" => Some(Self::Backlog),
            "in_progress" => Some(Self::InProgress),
            "in_review" => Some(Self::InReview),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Three-step rating used for both impact and effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Med,
    Low,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Med => "med",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "med" => Some(Self::Med),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Computed classification attached to a task at synthesis time.
///
/// Re-synthesis may legitimately change it as scores move, so it is the
/// only part of a persisted task that reconciliation overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub theme: ThemeCategory,
    pub impact: Level,
    pub effort: Level,
}

/// Validation errors for task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task id must not be the nil UUID.
    NilId,
    /// Progress must stay within `0..=100`.
    ProgressOutOfRange(u8),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::ProgressOutOfRange(value) => {
                write!(f, "progress ({value}) must be within 0..={MAX_PROGRESS}")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Action item synthesized from one insight sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    /// Stable id; survives re-synthesis when the title matches.
    pub id: TaskId,
    /// Action text; exact-match join key for reconciliation.
    pub title: String,
    pub theme: ThemeCategory,
    pub impact: Level,
    pub effort: Level,
    pub status: TaskStatus,
    /// Percent complete, `0..=100`.
    pub progress: u8,
    /// Unix epoch milliseconds of first synthesis.
    pub created_at: i64,
    /// Unix epoch milliseconds. Reserved for external scheduling.
    pub due_at: Option<i64>,
}

/// Unvalidated wire shape used by `Task` deserialization.
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    title: String,
    theme: ThemeCategory,
    impact: Level,
    effort: Level,
    status: TaskStatus,
    progress: u8,
    created_at: i64,
    #[serde(default)]
    due_at: Option<i64>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let task = Self {
            id: record.id,
            title: record.title,
            theme: record.theme,
            impact: record.impact,
            effort: record.effort,
            status: record.status,
            progress: record.progress,
            created_at: record.created_at,
            due_at: record.due_at,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Creates a backlog task with a generated id and zero progress.
    pub fn new(title: impl Into<String>, classification: Classification, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            theme: classification.theme,
            impact: classification.impact,
            effort: classification.effort,
            status: TaskStatus::Backlog,
            progress: 0,
            created_at,
            due_at: None,
        }
    }

    /// Creates a backlog task with a caller-provided id.
    ///
    /// Used by storage read paths and tests where identity already exists.
    ///
    /// # Errors
    /// - `TaskValidationError::NilId` when `id` is nil.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        classification: Classification,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        let mut task = Self::new(title, classification, created_at);
        task.id = id;
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.progress > MAX_PROGRESS {
            return Err(TaskValidationError::ProgressOutOfRange(self.progress));
        }
        Ok(())
    }

    pub fn classification(&self) -> Classification {
        Classification {
            theme: self.theme,
            impact: self.impact,
            effort: self.effort,
        }
    }

    /// Returns a copy carrying a freshly computed classification.
    pub fn reclassified(&self, classification: Classification) -> Self {
        Self {
            theme: classification.theme,
            impact: classification.impact,
            effort: classification.effort,
            ..self.clone()
        }
    }

    /// Returns a copy moved to the next status in the cycle.
    pub fn advanced(&self) -> Self {
        self.with_status(self.status.next())
    }

    /// Returns a copy with `status` set directly, bypassing the cycle.
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Returns a copy with `progress + delta` clamped to `0..=100`.
    pub fn with_progress_delta(&self, delta: i32) -> Self {
        let target = i64::from(self.progress) + i64::from(delta);
        let clamped = target.clamp(0, i64::from(MAX_PROGRESS));
        Self {
            progress: u8::try_from(clamped).unwrap_or(MAX_PROGRESS),
            ..self.clone()
        }
    }

    /// Whether the task still needs work.
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Done
    }
}
