//! Fixed theme categories used to bucket feedback.
//!
//! # Invariants
//! - `ThemeCategory::ALL` order is significant: it is the classifier
//!   tie-break order, and its first entry is the default category.
//! - `key()` always equals `normalize_theme_key(label())`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Feedback theme category.
///
/// Serialized as the normalized theme key (`speed_wait_time`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Service,
    SpeedWaitTime,
    Ambiance,
    FoodQuality,
    Cleanliness,
    PortionSize,
    PriceValue,
    StaffBehavior,
}

impl ThemeCategory {
    /// All categories in fixed classification order.
    pub const ALL: [ThemeCategory; 8] = [
        ThemeCategory::Service,
        ThemeCategory::SpeedWaitTime,
        ThemeCategory::Ambiance,
        ThemeCategory::FoodQuality,
        ThemeCategory::Cleanliness,
        ThemeCategory::PortionSize,
        ThemeCategory::PriceValue,
        ThemeCategory::StaffBehavior,
    ];

    /// Category returned when no keyword matches.
    pub const DEFAULT: ThemeCategory = ThemeCategory::ALL[0];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::SpeedWaitTime => "Speed/Wait Time",
            Self::Ambiance => "Ambiance",
            Self::FoodQuality => "Food Quality",
            Self::Cleanliness => "Cleanliness",
            Self::PortionSize => "Portion Size",
            Self::PriceValue => "Price/Value",
            Self::StaffBehavior => "Staff Behavior",
        }
    }

    /// Normalized lookup key (lowercase, spaces/slashes as underscores).
    pub fn key(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::SpeedWaitTime => "speed_wait_time",
            Self::Ambiance => "ambiance",
            Self::FoodQuality => "food_quality",
            Self::Cleanliness => "cleanliness",
            Self::PortionSize => "portion_size",
            Self::PriceValue => "price_value",
            Self::StaffBehavior => "staff_behavior",
        }
    }

    /// Parses a label, normalized key, or analytics-backend theme name.
    ///
    /// The backend names the wait-time theme `speed_wait` (displayed as
    /// "Speed Wait"); both spellings resolve to `SpeedWaitTime`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = normalize_theme_key(name);
        if key == "speed_wait" {
            return Some(Self::SpeedWaitTime);
        }
        Self::ALL.into_iter().find(|theme| theme.key() == key)
    }
}

impl Display for ThemeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalizes a theme name into its lookup key.
///
/// Rules: trim, lowercase, then replace every space and `/` with `_`.
pub fn normalize_theme_key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '/'], "_")
}
