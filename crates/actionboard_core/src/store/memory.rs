//! In-process task store.
//!
//! Used by tests and by callers that keep state in their own session.

use crate::model::scope::Scope;
use crate::model::task::Task;
use crate::store::{StoreResult, TaskStore};
use std::collections::HashMap;

/// `HashMap`-backed store keyed by scope.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    tasks_by_scope: HashMap<Scope, Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scopes that have been saved at least once.
    pub fn scope_count(&self) -> usize {
        self.tasks_by_scope.len()
    }
}

impl TaskStore for MemoryTaskStore {
    fn load(&self, scope: &Scope) -> StoreResult<Vec<Task>> {
        Ok(self.tasks_by_scope.get(scope).cloned().unwrap_or_default())
    }

    fn save(&mut self, scope: &Scope, tasks: &[Task]) -> StoreResult<()> {
        for task in tasks {
            task.validate()?;
        }
        self.tasks_by_scope.insert(scope.clone(), tasks.to_vec());
        Ok(())
    }
}
