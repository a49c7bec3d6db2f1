//! Task synthesizer: insight strings -> classified, reconciled tasks.
//!
//! # Responsibility
//! - Cap, rewrite, dedupe and classify insight strings into candidates.
//! - Reconcile candidates with prior tasks of the same scope.
//!
//! # Invariants
//! - Output order: recommendation-derived tasks, then improvement-derived
//!   tasks, each in input order.
//! - Dedupe runs per group; identical strings across groups both survive.
//! - Blank entries inside the caps are skipped; they never become tasks.
//! - A candidate whose title exactly equals a prior task's title returns the
//!   prior record (id, status, progress, timestamps) with only the
//!   classification replaced. Each prior task is claimed at most once.
//! - Re-running with the previous output as `prior_tasks` is idempotent.

use crate::config::{ConfigError, SynthesisConfig};
use crate::model::insight::ThemeMetrics;
use crate::model::scope::Scope;
use crate::model::task::{Classification, Task};
use crate::synthesis::classify::classify;
use crate::synthesis::dedupe::dedupe;
use crate::synthesis::estimate::{estimate_effort, estimate_impact, Origin};
use log::debug;
use regex::Regex;

/// Inputs for one synthesis run.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    pub scope: &'a Scope,
    pub recommendations: &'a [String],
    pub improvements: &'a [String],
    pub metrics: &'a ThemeMetrics,
    /// Unix epoch milliseconds stamped on fresh candidates.
    pub synthesized_at: i64,
}

/// Turns insight lists into tasks using a validated configuration.
#[derive(Debug, Clone)]
pub struct TaskSynthesizer {
    config: SynthesisConfig,
    imperative_re: Regex,
}

impl TaskSynthesizer {
    /// Builds a synthesizer after validating `config`.
    pub fn new(config: SynthesisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pattern = format!(r"(?i)^\s*{}\b", regex::escape(&config.imperative_verb));
        let imperative_re = Regex::new(&pattern)
            .map_err(|_| ConfigError::InvalidVerb(config.imperative_verb.clone()))?;
        Ok(Self {
            config,
            imperative_re,
        })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Builds fresh candidates without looking at prior state.
    pub fn candidates(&self, request: &SynthesisRequest<'_>) -> Vec<Task> {
        let recommendations: Vec<&str> = request
            .recommendations
            .iter()
            .take(self.config.recommendation_cap)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
            .collect();
        let improvements: Vec<String> = request
            .improvements
            .iter()
            .take(self.config.improvement_cap)
            .filter(|text| !text.trim().is_empty())
            .map(|text| self.to_imperative(text))
            .collect();

        let prefix_len = self.config.dedupe_prefix_len;
        let mut candidates = Vec::with_capacity(recommendations.len() + improvements.len());
        for title in dedupe(&recommendations, prefix_len) {
            candidates.push(self.build_task(title, Origin::Recommendation, request));
        }
        for title in dedupe(&improvements, prefix_len) {
            candidates.push(self.build_task(title, Origin::Improvement, request));
        }
        candidates
    }

    /// Builds candidates and reconciles them with `prior_tasks`.
    pub fn synthesize(&self, request: &SynthesisRequest<'_>, prior_tasks: &[Task]) -> Vec<Task> {
        let candidates = self.candidates(request);
        let candidate_count = candidates.len();
        let merged = reconcile(candidates, prior_tasks);
        let reused = merged
            .iter()
            .filter(|task| prior_tasks.iter().any(|prior| prior.id == task.id))
            .count();

        debug!(
            "event=task_synthesis module=synthesis status=ok business_id={} period_id={} candidates={} reused={} prior={}",
            request.scope.business_id(),
            request.scope.period_id(),
            candidate_count,
            reused,
            prior_tasks.len()
        );
        merged
    }

    /// Rewrites an improvement into imperative form unless it already
    /// starts with the configured verb. Both branches trim.
    fn to_imperative(&self, text: &str) -> String {
        let text = text.trim();
        if self.imperative_re.is_match(text) {
            return text.to_string();
        }
        format!("{} {}", self.config.imperative_verb, text.to_lowercase())
    }

    fn build_task(&self, title: String, origin: Origin, request: &SynthesisRequest<'_>) -> Task {
        let theme = classify(&title);
        let metrics = request.metrics.get(theme);
        let classification = Classification {
            theme,
            impact: estimate_impact(
                metrics.map(|value| value.score),
                metrics.and_then(|value| value.delta),
                origin,
            ),
            effort: estimate_effort(&title),
        };
        Task::new(title, classification, request.synthesized_at)
    }
}

/// Joins candidates with prior tasks on exact title equality.
///
/// Matched candidates keep the prior record with the candidate's
/// classification; unmatched candidates are returned unchanged.
pub fn reconcile(candidates: Vec<Task>, prior_tasks: &[Task]) -> Vec<Task> {
    let mut claimed = vec![false; prior_tasks.len()];

    candidates
        .into_iter()
        .map(|candidate| {
            let matched = prior_tasks
                .iter()
                .enumerate()
                .find(|(index, prior)| !claimed[*index] && prior.title == candidate.title);
            match matched {
                Some((index, prior)) => {
                    claimed[index] = true;
                    prior.reclassified(candidate.classification())
                }
                None => candidate,
            }
        })
        .collect()
}

/// Prior tasks whose ids do not appear in `merged`, in prior order.
pub fn superseded(merged: &[Task], prior_tasks: &[Task]) -> Vec<Task> {
    prior_tasks
        .iter()
        .filter(|prior| merged.iter().all(|task| task.id != prior.id))
        .cloned()
        .collect()
}
