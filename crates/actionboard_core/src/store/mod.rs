//! Scoped task persistence.
//!
//! # Responsibility
//! - Define the key-value contract between core and durable storage:
//!   one ordered task list per `Scope`.
//! - Isolate storage details from synthesis and lifecycle logic.
//!
//! # Invariants
//! - `save` replaces the full list for a scope; `load` returns exactly the
//!   last saved list in the same order, or an empty list.
//! - Scopes never observe each other's tasks.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::scope::Scope;
use crate::model::task::{Task, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryTaskStore;
pub use sqlite::SqliteTaskStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error surfaced unchanged to callers.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Validation(TaskValidationError),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Durable `(business, period) -> [Task]` store.
pub trait TaskStore {
    /// Loads the task list for `scope`; empty when nothing was saved.
    fn load(&self, scope: &Scope) -> StoreResult<Vec<Task>>;
    /// Replaces the task list for `scope`.
    fn save(&mut self, scope: &Scope, tasks: &[Task]) -> StoreResult<()>;
}

impl<T: TaskStore + ?Sized> TaskStore for &mut T {
    fn load(&self, scope: &Scope) -> StoreResult<Vec<Task>> {
        (**self).load(scope)
    }

    fn save(&mut self, scope: &Scope, tasks: &[Task]) -> StoreResult<()> {
        (**self).save(scope, tasks)
    }
}
