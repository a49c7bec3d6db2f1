//! Impact and effort heuristics.
//!
//! Scores are sentiment values on `[-1, 1]`; deltas are period-over-period
//! differences on the same scale.

use crate::model::task::Level;

/// Scores below this are treated as a problem area.
const WEAK_SCORE_CEILING: f64 = 0.6;
/// Scores in `[WEAK_SCORE_CEILING, MIDDLING_SCORE_CEILING)` rate medium.
const MIDDLING_SCORE_CEILING: f64 = 0.7;
/// Deltas below this count as a sharp decline.
const SHARP_DECLINE_DELTA: f64 = -0.04;

const HIGH_EFFORT_KEYWORDS: &[&str] = &[
    "hire",
    "hiring",
    "staffing",
    "train",
    "schedule",
    "scheduling",
    "shift",
    "renovat",
    "remodel",
    "overhaul",
    "redesign",
    "equipment",
];

const LOW_EFFORT_KEYWORDS: &[&str] = &[
    "signage",
    "label",
    "menu board",
    "display",
    "napkin",
    "cosmetic",
    "paint",
    "playlist",
    "music",
    "lighting",
    "decor",
    "reminder",
    "table tent",
];

/// Which insight list a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Recommendation,
    Improvement,
}

/// Estimates impact from the candidate's theme metrics and origin.
///
/// Rules, first match wins:
/// 1. improvements are always `High`
/// 2. `score < 0.6` -> `High`
/// 3. `delta < -0.04` -> `High`
/// 4. `delta` in `[-0.04, 0)` -> `Med`
/// 5. `score` in `[0.6, 0.7)` -> `Med`
/// 6. otherwise `Low`
pub fn estimate_impact(score: Option<f64>, delta: Option<f64>, origin: Origin) -> Level {
    if origin == Origin::Improvement {
        return Level::High;
    }
    if score.is_some_and(|value| value < WEAK_SCORE_CEILING) {
        return Level::High;
    }
    if delta.is_some_and(|value| value < SHARP_DECLINE_DELTA) {
        return Level::High;
    }
    if delta.is_some_and(|value| (SHARP_DECLINE_DELTA..0.0).contains(&value)) {
        return Level::Med;
    }
    if score.is_some_and(|value| (WEAK_SCORE_CEILING..MIDDLING_SCORE_CEILING).contains(&value)) {
        return Level::Med;
    }
    Level::Low
}

/// Estimates effort from keywords in the insight text.
///
/// High-effort terms are checked before low-effort terms; no match is `Med`.
pub fn estimate_effort(text: &str) -> Level {
    let lowered = text.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    if mentions(HIGH_EFFORT_KEYWORDS) {
        Level::High
    } else if mentions(LOW_EFFORT_KEYWORDS) {
        Level::Low
    } else {
        Level::Med
    }
}

#[cfg(test)]
mod tests {
    use super::{estimate_effort, estimate_impact, Origin};
    use crate::model::task::Level;

    #[test]
    fn improvements_are_always_high_impact() {
        assert_eq!(
            estimate_impact(Some(0.95), Some(0.2), Origin::Improvement),
            Level::High
        );
        assert_eq!(estimate_impact(None, None, Origin::Improvement), Level::High);
    }

    #[test]
    fn recommendation_impact_follows_rule_order() {
        let rec = Origin::Recommendation;
        assert_eq!(estimate_impact(Some(0.59), None, rec), Level::High);
        assert_eq!(estimate_impact(Some(0.9), Some(-0.05), rec), Level::High);
        assert_eq!(estimate_impact(Some(0.9), Some(-0.04), rec), Level::Med);
        assert_eq!(estimate_impact(Some(0.9), Some(-0.01), rec), Level::Med);
        assert_eq!(estimate_impact(Some(0.6), None, rec), Level::Med);
        assert_eq!(estimate_impact(Some(0.65), Some(0.0), rec), Level::Med);
        assert_eq!(estimate_impact(Some(0.7), Some(0.0), rec), Level::Low);
        assert_eq!(estimate_impact(Some(0.9), Some(0.1), rec), Level::Low);
    }

    #[test]
    fn recommendation_without_metrics_is_low() {
        assert_eq!(estimate_impact(None, None, Origin::Recommendation), Level::Low);
    }

    #[test]
    fn effort_checks_high_before_low() {
        assert_eq!(estimate_effort("Hire a host for weekend shifts"), Level::High);
        assert_eq!(estimate_effort("Redesign signage near the door"), Level::High);
        assert_eq!(estimate_effort("Update SIGNAGE for the patio"), Level::Low);
        assert_eq!(estimate_effort("Offer a loyalty discount"), Level::Med);
        assert_eq!(estimate_effort(""), Level::Med);
    }
}
