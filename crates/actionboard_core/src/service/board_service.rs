//! Task board use-case service.
//!
//! # Responsibility
//! - Refresh a scope's board from fresh insights while keeping user edits.
//! - Expose lifecycle commands (advance, direct status, progress).
//! - Write every successful mutation through to the scoped store.
//!
//! # Invariants
//! - Each command loads the scope's current snapshot, applies one pure
//!   `Task` command, and saves before returning; the store never holds an
//!   older state than the last returned task.
//! - Unknown task ids return `TaskError::NotFound` and write nothing.
//! - Store errors propagate unchanged; nothing is retried or masked.
//!
//! Single owner per scope is assumed. Concurrent writers to one scope need
//! external serialization; last save wins.

use crate::model::insight::{InsightBundle, ThemeMetrics};
use crate::model::scope::{Scope, ScopeError};
use crate::model::task::{Level, Task, TaskId, TaskStatus};
use crate::store::{StoreError, TaskStore};
use crate::synthesis::synthesizer::{superseded, SynthesisRequest, TaskSynthesizer};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Service error for board use-cases.
#[derive(Debug)]
pub enum TaskError {
    /// Target task does not exist in the scope.
    NotFound(TaskId),
    /// Scope identifiers are malformed.
    InvalidInput(ScopeError),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::InvalidInput(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ScopeError> for TaskError {
    fn from(value: ScopeError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<StoreError> for TaskError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Aggregate counters for a board header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub total: usize,
    pub backlog: usize,
    pub in_progress: usize,
    pub in_review: usize,
    pub done: usize,
    /// Mean progress rounded down; 0 for an empty board.
    pub average_progress: u8,
    /// High-impact tasks not yet done.
    pub open_high_impact: usize,
}

impl BoardSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut summary = Self {
            total: tasks.len(),
            ..Self::default()
        };
        let mut progress_sum: usize = 0;

        for task in tasks {
            match task.status {
                TaskStatus::Backlog => summary.backlog += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::InReview => summary.in_review += 1,
                TaskStatus::Done => summary.done += 1,
            }
            if task.impact == Level::High && task.is_open() {
                summary.open_high_impact += 1;
            }
            progress_sum += usize::from(task.progress);
        }

        if let Some(average) = progress_sum.checked_div(tasks.len()) {
            summary.average_progress = u8::try_from(average).unwrap_or(u8::MAX);
        }
        summary
    }
}

/// Board service over a scoped store implementation.
pub struct TaskBoardService<S: TaskStore> {
    store: S,
    synthesizer: TaskSynthesizer,
}

impl<S: TaskStore> TaskBoardService<S> {
    /// Creates a service using the provided store and synthesizer.
    pub fn new(store: S, synthesizer: TaskSynthesizer) -> Self {
        Self { store, synthesizer }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Re-synthesizes a scope from fresh insights and persists the result.
    ///
    /// Returns the merged set: recommendation tasks, then improvement tasks.
    /// With `retain_superseded`, prior tasks no longer produced are kept in
    /// the persisted snapshot after the merged set, but are not returned.
    pub fn refresh(
        &mut self,
        scope: &Scope,
        insights: &InsightBundle,
        metrics: &ThemeMetrics,
    ) -> Result<Vec<Task>, TaskError> {
        let prior = self.store.load(scope)?;
        let request = SynthesisRequest {
            scope,
            recommendations: &insights.recommendations,
            improvements: &insights.improve,
            metrics,
            synthesized_at: now_epoch_ms(),
        };
        let merged = self.synthesizer.synthesize(&request, &prior);

        let mut snapshot = merged.clone();
        if self.synthesizer.config().retain_superseded {
            snapshot.extend(superseded(&merged, &prior));
        }
        self.save(scope, &snapshot, "task_refresh")?;

        info!(
            "event=task_refresh module=service status=ok tasks={} persisted={}",
            merged.len(),
            snapshot.len()
        );
        Ok(merged)
    }

    /// Lists the persisted tasks for a scope in stored order.
    pub fn list_tasks(&self, scope: &Scope) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.load(scope)?)
    }

    /// Gets one task by id.
    pub fn get_task(&self, scope: &Scope, task_id: TaskId) -> Result<Task, TaskError> {
        self.store
            .load(scope)?
            .into_iter()
            .find(|task| task.id == task_id)
            .ok_or(TaskError::NotFound(task_id))
    }

    /// Moves a task to the next status in the cycle.
    pub fn advance_status(&mut self, scope: &Scope, task_id: TaskId) -> Result<Task, TaskError> {
        self.apply(scope, task_id, "task_advance_status", Task::advanced)
    }

    /// Jumps a task directly to `status`, bypassing the cycle.
    pub fn set_status(
        &mut self,
        scope: &Scope,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<Task, TaskError> {
        self.apply(scope, task_id, "task_set_status", |task| task.with_status(status))
    }

    /// Adds `delta` to progress, clamping to `0..=100`.
    pub fn adjust_progress(
        &mut self,
        scope: &Scope,
        task_id: TaskId,
        delta: i32,
    ) -> Result<Task, TaskError> {
        self.apply(scope, task_id, "task_adjust_progress", |task| {
            task.with_progress_delta(delta)
        })
    }

    /// Summarizes the persisted board for a scope.
    pub fn summary(&self, scope: &Scope) -> Result<BoardSummary, TaskError> {
        Ok(BoardSummary::from_tasks(&self.store.load(scope)?))
    }

    fn apply(
        &mut self,
        scope: &Scope,
        task_id: TaskId,
        event: &'static str,
        command: impl FnOnce(&Task) -> Task,
    ) -> Result<Task, TaskError> {
        let mut tasks = self.store.load(scope)?;
        let Some(slot) = tasks.iter_mut().find(|task| task.id == task_id) else {
            warn!("event={event} module=service status=error error_code=task_not_found");
            return Err(TaskError::NotFound(task_id));
        };

        let updated = command(slot);
        *slot = updated.clone();
        self.save(scope, &tasks, event)?;

        info!(
            "event={} module=service status=ok task_status={} progress={}",
            event,
            updated.status.as_str(),
            updated.progress
        );
        Ok(updated)
    }

    fn save(
        &mut self,
        scope: &Scope,
        tasks: &[Task],
        event: &'static str,
    ) -> Result<(), TaskError> {
        self.store.save(scope, tasks).map_err(|err| {
            warn!("event={event} module=service status=error error_code=store_save_failed error={err}");
            TaskError::Store(err)
        })
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::BoardSummary;
    use crate::model::task::{Classification, Level, Task, TaskStatus};
    use crate::model::theme::ThemeCategory;

    fn task(impact: Level, status: TaskStatus, progress: u8) -> Task {
        let mut task = Task::new(
            "Check the patio heaters",
            Classification {
                theme: ThemeCategory::Ambiance,
                impact,
                effort: Level::Med,
            },
            0,
        )
        .with_status(status);
        task.progress = progress;
        task
    }

    #[test]
    fn summary_counts_statuses_and_open_high_impact() {
        let tasks = vec![
            task(Level::High, TaskStatus::Backlog, 0),
            task(Level::High, TaskStatus::Done, 100),
            task(Level::Low, TaskStatus::InReview, 50),
            task(Level::High, TaskStatus::InProgress, 25),
        ];

        let summary = BoardSummary::from_tasks(&tasks);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.backlog, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.in_review, 1);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.average_progress, 43);
        assert_eq!(summary.open_high_impact, 2);
    }

    #[test]
    fn summary_of_empty_board_is_zeroed() {
        assert_eq!(BoardSummary::from_tasks(&[]), BoardSummary::default());
    }
}
