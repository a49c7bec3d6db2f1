//! Input contract consumed from the analytics backend.
//!
//! # Responsibility
//! - Deserialize insight lists, per-theme metrics and quotes as the backend
//!   emits them.
//! - Index metrics and quotes by `ThemeCategory` for synthesis and display.
//!
//! # Invariants
//! - Nothing here is mutated by synthesis or lifecycle operations.
//! - Unknown theme names are skipped, never mapped to a default.

use crate::model::task::Task;
use crate::model::theme::ThemeCategory;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Textual insight lists for one `(business, period)`.
///
/// Other backend fields (`love`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightBundle {
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub improve: Vec<String>,
}

/// One theme row as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeMetric {
    /// Theme display name or key, e.g. `Speed Wait` or `price_value`.
    /// The overview endpoint names this field `theme`.
    #[serde(alias = "theme")]
    pub name: String,
    /// Sentiment score on `[-1, 1]`.
    pub score: f64,
    /// Period-over-period change; absent for a first period.
    #[serde(default)]
    pub delta: Option<f64>,
}

/// Score and delta for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeScore {
    pub score: f64,
    pub delta: Option<f64>,
}

/// Per-theme metrics indexed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeMetrics {
    by_theme: BTreeMap<ThemeCategory, ThemeScore>,
}

impl ThemeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from backend rows.
    ///
    /// The first row for a theme wins; rows with unknown names are skipped.
    pub fn from_metrics<'a>(metrics: impl IntoIterator<Item = &'a ThemeMetric>) -> Self {
        let mut index = Self::new();
        for metric in metrics {
            let Some(theme) = ThemeCategory::from_name(&metric.name) else {
                warn!("event=theme_metric_skipped module=model reason=unknown_theme");
                continue;
            };
            index
                .by_theme
                .entry(theme)
                .or_insert(ThemeScore {
                    score: metric.score,
                    delta: metric.delta,
                });
        }
        index
    }

    /// Sets the score for one theme, replacing any previous value.
    pub fn insert(&mut self, theme: ThemeCategory, score: f64, delta: Option<f64>) {
        self.by_theme.insert(theme, ThemeScore { score, delta });
    }

    pub fn get(&self, theme: ThemeCategory) -> Option<ThemeScore> {
        self.by_theme.get(&theme).copied()
    }

    pub fn len(&self) -> usize {
        self.by_theme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_theme.is_empty()
    }
}

/// Representative review quotes for one theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeQuotes {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

/// Backend `quotes_by_theme` map keyed by normalized theme key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotesByTheme(BTreeMap<String, ThemeQuotes>);

impl QuotesByTheme {
    pub fn new(quotes: BTreeMap<String, ThemeQuotes>) -> Self {
        Self(quotes)
    }

    /// Looks up quotes for a theme.
    ///
    /// Exact key match first, then any key that resolves to the same theme
    /// (the backend spells the wait-time key `speed_wait`).
    pub fn for_theme(&self, theme: ThemeCategory) -> Option<&ThemeQuotes> {
        self.0.get(theme.key()).or_else(|| {
            self.0
                .iter()
                .find(|(key, _)| ThemeCategory::from_name(key) == Some(theme))
                .map(|(_, quotes)| quotes)
        })
    }

    /// Display lookup for a task's detail view.
    pub fn for_task(&self, task: &Task) -> Option<&ThemeQuotes> {
        self.for_theme(task.theme)
    }
}
