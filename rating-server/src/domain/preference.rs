//! User preferences: how much each transit mode matters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How important a transit mode is to the searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceLevel {
    /// The mode is excluded from rating entirely.
    #[default]
    None,
    Low,
    #[serde(alias = "med")]
    Medium,
    High,
}

impl PreferenceLevel {
    /// Numeric weight used when composing per-mode ratings.
    ///
    /// `None` maps to zero, but callers never put a `None` mode into a weight
    /// sum: the mode is skipped instead.
    pub fn weight(self) -> f64 {
        match self {
            PreferenceLevel::None => 0.0,
            PreferenceLevel::Low => 1.0,
            PreferenceLevel::Medium => 2.0,
            PreferenceLevel::High => 4.0,
        }
    }

    pub fn is_none(self) -> bool {
        self == PreferenceLevel::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceLevel::None => "none",
            PreferenceLevel::Low => "low",
            PreferenceLevel::Medium => "medium",
            PreferenceLevel::High => "high",
        }
    }
}

impl fmt::Display for PreferenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which CTA destinations the searcher cares about most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaFocus {
    #[serde(alias = "hyde_park_focus")]
    HydePark,
    #[serde(alias = "downtown_focus")]
    Downtown,
    #[default]
    Neither,
}

/// A transit modality a preference can be expressed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Walking,
    Driving,
    Cta,
    /// Bike share. Rated through Divvy stations.
    Bicycling,
    Shuttles,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Walking,
        Mode::Driving,
        Mode::Cta,
        Mode::Bicycling,
        Mode::Shuttles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walking => "walking",
            Mode::Driving => "driving",
            Mode::Cta => "cta",
            Mode::Bicycling => "bicycling",
            Mode::Shuttles => "shuttles",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preference level per transit mode.
///
/// Missing modes deserialize as [`PreferenceLevel::None`]. `divvy` is
/// accepted as an alias for `bicycling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitPreferences {
    pub walking: PreferenceLevel,
    pub driving: PreferenceLevel,
    pub cta: PreferenceLevel,
    #[serde(alias = "divvy")]
    pub bicycling: PreferenceLevel,
    pub shuttles: PreferenceLevel,
}

impl TransitPreferences {
    pub fn level(&self, mode: Mode) -> PreferenceLevel {
        match mode {
            Mode::Walking => self.walking,
            Mode::Driving => self.driving,
            Mode::Cta => self.cta,
            Mode::Bicycling => self.bicycling,
            Mode::Shuttles => self.shuttles,
        }
    }

    /// Set one mode's level, builder style.
    pub fn with(mut self, mode: Mode, level: PreferenceLevel) -> Self {
        match mode {
            Mode::Walking => self.walking = level,
            Mode::Driving => self.driving = level,
            Mode::Cta => self.cta = level,
            Mode::Bicycling => self.bicycling = level,
            Mode::Shuttles => self.shuttles = level,
        }
        self
    }

    /// Modes with a level other than `None`, in [`Mode::ALL`] order.
    pub fn active_modes(&self) -> impl Iterator<Item = Mode> + '_ {
        Mode::ALL
            .into_iter()
            .filter(|mode| !self.level(*mode).is_none())
    }
}
