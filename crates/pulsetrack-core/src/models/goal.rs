// ABOUTME: Goal entity with derived progress metrics
// ABOUTME: Progress display clamps to [0, 100]% while the raw ratio stays unclamped
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user goal with a numeric target.
///
/// Progress is derived from `current_value / target_value`; it is not a
/// stored column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Goal id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Short name
    pub name: String,
    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category (endurance, strength, technique, ...)
    pub category: String,
    /// Current value in `unit`
    pub current_value: f64,
    /// Target value in `unit`
    pub target_value: f64,
    /// Measurement unit
    pub unit: String,
    /// Optional target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Raw completion ratio, unclamped. Zero when the target is non-positive.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.target_value > 0.0 {
            self.current_value / self.target_value
        } else {
            0.0
        }
    }

    /// Progress percentage for display, clamped to [0, 100]
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        (self.ratio() * 100.0).clamp(0.0, 100.0)
    }
}

/// Payload for creating a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    /// Short name
    pub name: String,
    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    pub category: String,
    /// Starting value, usually zero
    #[serde(default)]
    pub current_value: f64,
    /// Target value
    pub target_value: f64,
    /// Measurement unit
    pub unit: String,
    /// Optional target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

/// Partial update payload for a goal row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New current value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    /// New target value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    /// New completion flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl GoalUpdate {
    /// Update that only moves the current value
    #[must_use]
    pub fn progress(current_value: f64) -> Self {
        Self {
            current_value: Some(current_value),
            ..Self::default()
        }
    }

    /// Apply this update to an in-memory goal row
    pub fn apply_to(&self, goal: &mut Goal) {
        if let Some(name) = &self.name {
            goal.name = name.clone();
        }
        if let Some(description) = &self.description {
            goal.description = Some(description.clone());
        }
        if let Some(current_value) = self.current_value {
            goal.current_value = current_value;
        }
        if let Some(target_value) = self.target_value {
            goal.target_value = target_value;
        }
        if let Some(completed) = self.completed {
            goal.completed = completed;
        }
        goal.updated_at = Utc::now();
    }
}
