// ABOUTME: Sport enumeration with display info and the sport profile entity
// ABOUTME: Exhaustive sport codes with a guaranteed fallback branch for unknown codes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// Default training frequency (sessions per week) for a fresh sport profile
pub const DEFAULT_TRAINING_FREQUENCY: u32 = 3;

/// Default session duration in minutes for a fresh sport profile
pub const DEFAULT_SESSION_DURATION: u32 = 60;

/// Icon shown for sports without a dedicated one
const FALLBACK_ICON: &str = "🏃‍♂️";

/// Enumeration of the sports the application knows how to display.
///
/// The `Other` variant carries any code the enumeration does not cover, so
/// lookups always resolve to a label/icon pair and never fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sport {
    /// Swimming
    Swimming,
    /// Running
    Running,
    /// Cycling
    Cycling,
    /// Basketball
    Basketball,
    /// Soccer/football
    Soccer,
    /// Tennis
    Tennis,
    /// Any sport code without a dedicated variant
    Other(String),
}

impl Sport {
    /// Parse a sport code; unknown codes land in [`Sport::Other`]
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "swimming" => Self::Swimming,
            "running" => Self::Running,
            "cycling" => Self::Cycling,
            "basketball" => Self::Basketball,
            "soccer" => Self::Soccer,
            "tennis" => Self::Tennis,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The persisted code for this sport
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Swimming => "swimming",
            Self::Running => "running",
            Self::Cycling => "cycling",
            Self::Basketball => "basketball",
            Self::Soccer => "soccer",
            Self::Tennis => "tennis",
            Self::Other(code) => code,
        }
    }

    /// Display label and icon for this sport.
    ///
    /// Unknown codes fall back to the raw code as label with a generic icon.
    #[must_use]
    pub fn info(&self) -> SportInfo {
        let (label, icon) = match self {
            Self::Swimming => ("Swimming", "🏊‍♂️"),
            Self::Running => ("Running", FALLBACK_ICON),
            Self::Cycling => ("Cycling", "🚴‍♂️"),
            Self::Basketball => ("Basketball", "🏀"),
            Self::Soccer => ("Soccer", "⚽"),
            Self::Tennis => ("Tennis", "🎾"),
            Self::Other(code) => {
                return SportInfo {
                    label: code.clone(),
                    icon: FALLBACK_ICON.to_owned(),
                }
            }
        };
        SportInfo {
            label: label.to_owned(),
            icon: icon.to_owned(),
        }
    }
}

impl From<String> for Sport {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Sport> for String {
    fn from(sport: Sport) -> Self {
        sport.code().to_owned()
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Display label and icon pair for a sport code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportInfo {
    /// Human-readable label
    pub label: String,
    /// Emoji icon
    pub icon: String,
}

/// Sport profile collected during onboarding.
///
/// One-to-one with the user, created lazily on first save and deletable
/// independently of the display profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportProfile {
    /// Primary sport code; empty until onboarding collects one
    #[serde(default)]
    pub primary_sport: String,
    /// Self-reported experience level; empty until collected
    #[serde(default)]
    pub experience_level: String,
    /// Competitive level (recreational, club, elite, ...)
    #[serde(default)]
    pub competitive_level: String,
    /// Training sessions per week
    pub training_frequency: u32,
    /// Session duration in minutes
    pub session_duration: u32,
    /// Free-text training goals
    #[serde(default)]
    pub current_goals: String,
}

impl Default for SportProfile {
    fn default() -> Self {
        Self {
            primary_sport: String::new(),
            experience_level: String::new(),
            competitive_level: String::new(),
            training_frequency: DEFAULT_TRAINING_FREQUENCY,
            session_duration: DEFAULT_SESSION_DURATION,
            current_goals: String::new(),
        }
    }
}

impl SportProfile {
    /// Completeness predicate: both primary sport and experience level set.
    ///
    /// Derived, never stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.primary_sport.is_empty() && !self.experience_level.is_empty()
    }

    /// The primary sport as an enum value
    #[must_use]
    pub fn sport(&self) -> Sport {
        Sport::from_code(&self.primary_sport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sport_info() {
        let info = Sport::from_code("swimming").info();
        assert_eq!(info.label, "Swimming");
        assert_eq!(info.icon, "🏊‍♂️");
    }

    #[test]
    fn test_unknown_sport_falls_back() {
        let info = Sport::from_code("archery").info();
        assert_eq!(info.label, "archery");
        assert_eq!(info.icon, FALLBACK_ICON);
    }

    #[test]
    fn test_sport_round_trips_through_serde() {
        let sport: Sport = serde_json::from_str("\"cycling\"").expect("valid code");
        assert_eq!(sport, Sport::Cycling);
        assert_eq!(serde_json::to_string(&sport).expect("serializes"), "\"cycling\"");
    }

    #[test]
    fn test_profile_completeness() {
        let mut profile = SportProfile {
            primary_sport: "swimming".into(),
            experience_level: "beginner".into(),
            ..SportProfile::default()
        };
        assert!(profile.is_complete());

        profile.primary_sport.clear();
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_defaults_match_schema() {
        let profile = SportProfile::default();
        assert_eq!(profile.training_frequency, 3);
        assert_eq!(profile.session_duration, 60);
    }
}
