//! Core engine for turning analytics insights into tracked action items.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod synthesis;

pub use config::{ConfigError, SynthesisConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::insight::{InsightBundle, QuotesByTheme, ThemeMetric, ThemeMetrics, ThemeQuotes};
pub use model::scope::{Scope, ScopeError};
pub use model::task::{Classification, Level, Task, TaskId, TaskStatus, TaskValidationError};
pub use model::theme::{normalize_theme_key, ThemeCategory};
pub use service::board_service::{BoardSummary, TaskBoardService, TaskError};
pub use store::{MemoryTaskStore, SqliteTaskStore, StoreError, StoreResult, TaskStore};
pub use synthesis::classify::classify;
pub use synthesis::dedupe::dedupe;
pub use synthesis::estimate::{estimate_effort, estimate_impact, Origin};
pub use synthesis::synthesizer::{SynthesisRequest, TaskSynthesizer};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
