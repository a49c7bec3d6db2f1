//! SQLite task store.
//!
//! # Responsibility
//! - Persist each scope's ordered task list as rows in `scope_tasks`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` replaces a scope's rows and snapshot marker in one transaction.
//! - `position` preserves list order; `load` returns rows by position.
//! - Read paths reject unknown enum text and invalid records.

use crate::model::scope::Scope;
use crate::model::task::{Level, Task, TaskStatus};
use crate::model::theme::ThemeCategory;
use crate::store::{StoreError, StoreResult, TaskStore};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    theme,
    impact,
    effort,
    status,
    progress,
    created_at,
    due_at
FROM scope_tasks";

/// SQLite-backed scoped task store.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `StoreError::MissingRequiredTable` when migrations were not applied.
    pub fn try_new(conn: &'conn mut Connection) -> StoreResult<Self> {
        for table in ["scope_tasks", "scope_snapshots"] {
            if !table_exists(conn, table)? {
                return Err(StoreError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }

    /// Epoch milliseconds of the last `save` for `scope`, if any.
    pub fn last_saved_at(&self, scope: &Scope) -> StoreResult<Option<i64>> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at
                 FROM scope_snapshots
                 WHERE business_id = ?1 AND period_id = ?2;",
                params![scope.business_id(), scope.period_id()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn load(&self, scope: &Scope) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE business_id = ?1 AND period_id = ?2
             ORDER BY position ASC;"
        ))?;
        let mut rows = stmt.query(params![scope.business_id(), scope.period_id()])?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn save(&mut self, scope: &Scope, tasks: &[Task]) -> StoreResult<()> {
        for task in tasks {
            task.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM scope_tasks WHERE business_id = ?1 AND period_id = ?2;",
            params![scope.business_id(), scope.period_id()],
        )?;

        for (position, task) in tasks.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| StoreError::InvalidData("task list too long".to_string()))?;
            tx.execute(
                "INSERT INTO scope_tasks (
                    business_id,
                    period_id,
                    position,
                    id,
                    title,
                    theme,
                    impact,
                    effort,
                    status,
                    progress,
                    created_at,
                    due_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
                params![
                    scope.business_id(),
                    scope.period_id(),
                    position,
                    task.id.to_string(),
                    task.title.as_str(),
                    task.theme.key(),
                    task.impact.as_str(),
                    task.effort.as_str(),
                    task.status.as_str(),
                    i64::from(task.progress),
                    task.created_at,
                    task.due_at,
                ],
            )
            .inspect_err(|err| {
                error!(
                    "event=task_store_save module=store status=error error_code=insert_failed error={err}"
                );
            })?;
        }

        let task_count = i64::try_from(tasks.len())
            .map_err(|_| StoreError::InvalidData("task list too long".to_string()))?;
        tx.execute(
            "INSERT INTO scope_snapshots (business_id, period_id, task_count, updated_at)
             VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000))
             ON CONFLICT (business_id, period_id) DO UPDATE SET
                task_count = excluded.task_count,
                updated_at = excluded.updated_at;",
            params![scope.business_id(), scope.period_id(), task_count],
        )?;
        tx.commit()?;

        debug!(
            "event=task_store_save module=store status=ok tasks={}",
            tasks.len()
        );
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{id_text}` in scope_tasks.id"))
    })?;

    let theme_text: String = row.get("theme")?;
    let theme = ThemeCategory::from_name(&theme_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid theme `{theme_text}` in scope_tasks.theme"))
    })?;

    let impact = parse_level(row, "impact")?;
    let effort = parse_level(row, "effort")?;

    let status_text: String = row.get("status")?;
    let status = TaskStatus::parse(&status_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid task status `{status_text}` in scope_tasks.status"
        ))
    })?;

    let progress_value: i64 = row.get("progress")?;
    let progress = u8::try_from(progress_value).map_err(|_| {
        StoreError::InvalidData(format!(
            "invalid progress `{progress_value}` in scope_tasks.progress"
        ))
    })?;

    let task = Task {
        id,
        title: row.get("title")?,
        theme,
        impact,
        effort,
        status,
        progress,
        created_at: row.get("created_at")?,
        due_at: row.get("due_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn parse_level(row: &Row<'_>, column: &'static str) -> StoreResult<Level> {
    let text: String = row.get(column)?;
    Level::parse(&text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid level `{text}` in scope_tasks.{column}"))
    })
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
