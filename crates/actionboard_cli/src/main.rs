//! CLI probe for the action-board engine.
//!
//! # Responsibility
//! - Refresh one scope from a backend overview document and print the board.
//! - Exercise the SQLite store end to end outside any UI runtime.
//!
//! Logging is enabled only when `--log-dir` (or `ACTIONBOARD_LOG_DIR`) is set.

use actionboard_core::db::open_db;
use actionboard_core::{
    default_log_level, init_logging, BoardSummary, InsightBundle, QuotesByTheme, Scope,
    SqliteTaskStore, SynthesisConfig, Task, TaskBoardService, TaskSynthesizer, ThemeMetric,
    ThemeMetrics, ThemeQuotes,
};
use clap::Parser;
use log::error;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "actionboard_cli",
    version,
    about = "Refresh one business period's action board from an overview file"
)]
struct Args {
    /// SQLite database file; created and migrated when missing.
    db_path: PathBuf,

    business_id: String,

    period_id: String,

    /// Overview JSON with `themes`, `insights` and `quotes_by_theme`.
    overview: PathBuf,

    /// Optional synthesis config JSON.
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "ACTIONBOARD_LOG_DIR")]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error; defaults by build profile.
    #[arg(long, env = "ACTIONBOARD_LOG_LEVEL")]
    log_level: Option<String>,
}

/// Subset of the business overview payload the engine consumes.
#[derive(Debug, Default, Deserialize)]
struct OverviewDocument {
    #[serde(default)]
    themes: Vec<ThemeMetric>,
    #[serde(default)]
    insights: InsightBundle,
    #[serde(default)]
    quotes_by_theme: QuotesByTheme,
}

#[derive(Debug, Serialize)]
struct BoardTask<'a> {
    #[serde(flatten)]
    task: &'a Task,
    #[serde(skip_serializing_if = "Option::is_none")]
    quotes: Option<&'a ThemeQuotes>,
}

#[derive(Debug, Serialize)]
struct BoardReport<'a> {
    scope: String,
    summary: BoardSummary,
    tasks: Vec<BoardTask<'a>>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&args) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_refresh module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, Box<dyn Error>> {
    let scope = Scope::new(&args.business_id, &args.period_id)?;
    let overview: OverviewDocument = read_json(&args.overview)?;
    let config: SynthesisConfig = match args.config.as_deref() {
        Some(path) => read_json(path)?,
        None => SynthesisConfig::default(),
    };

    let mut conn = open_db(&args.db_path)?;
    let store = SqliteTaskStore::try_new(&mut conn)?;
    let mut service = TaskBoardService::new(store, TaskSynthesizer::new(config)?);

    let metrics = ThemeMetrics::from_metrics(&overview.themes);
    let tasks = service.refresh(&scope, &overview.insights, &metrics)?;
    let summary = service.summary(&scope)?;

    let report = BoardReport {
        scope: scope.to_string(),
        summary,
        tasks: tasks
            .iter()
            .map(|task| BoardTask {
                task,
                quotes: overview.quotes_by_theme.for_task(task),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}
