//! Keyword-based theme classifier.

use crate::model::theme::ThemeCategory;

/// Ordered `(category, keywords)` table. Order is the tie-break.
///
/// Keywords are lowercase substrings matched against lowercased input.
const THEME_KEYWORDS: &[(ThemeCategory, &[&str])] = &[
    (
        ThemeCategory::Service,
        &[
            "service",
            "server",
            "waiter",
            "waitress",
            "attentive",
            "helpful",
            "welcoming",
            "greet",
            "host",
            "follow up",
            "follow-up",
        ],
    ),
    (
        ThemeCategory::SpeedWaitTime,
        &[
            "wait", "slow", "delay", "speed", "quick", "queue", "minutes", "rush", "turnaround",
            "prompt", "seating",
        ],
    ),
    (
        ThemeCategory::Ambiance,
        &[
            "ambiance",
            "ambience",
            "atmosphere",
            "noise",
            "loud",
            "music",
            "decor",
            "lighting",
            "vibe",
            "cozy",
            "crowded",
        ],
    ),
    (
        ThemeCategory::FoodQuality,
        &[
            "food",
            "taste",
            "flavor",
            "flavour",
            "menu",
            "dish",
            "recipe",
            "fresh",
            "season",
            "cook",
            "ingredient",
            "bland",
            "spicy",
            "sauce",
        ],
    ),
    (
        ThemeCategory::Cleanliness,
        &[
            "clean", "dirty", "hygiene", "sanit", "restroom", "bathroom", "tidy", "messy",
            "spotless", "floor",
        ],
    ),
    (
        ThemeCategory::PortionSize,
        &[
            "portion",
            "serving size",
            "skimpy",
            "generous",
            "tiny",
            "larger",
            "smaller",
        ],
    ),
    (
        ThemeCategory::PriceValue,
        &[
            "price",
            "pricing",
            "value",
            "expensive",
            "cheap",
            "overpriced",
            "afford",
            "cost",
            "discount",
            "worth",
            "bill",
        ],
    ),
    (
        ThemeCategory::StaffBehavior,
        &[
            "staff",
            "attitude",
            "behavior",
            "behaviour",
            "rude",
            "polite",
            "courteous",
            "friendly",
            "professional",
            "employee",
        ],
    ),
];

/// Maps free text to the first theme whose keywords it contains.
///
/// Falls back to `ThemeCategory::DEFAULT` when nothing matches, including
/// for empty input.
pub fn classify(text: &str) -> ThemeCategory {
    let lowered = text.to_lowercase();
    THEME_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or(ThemeCategory::DEFAULT, |(theme, _)| *theme)
}
