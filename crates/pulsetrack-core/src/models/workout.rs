// ABOUTME: Workout and scheduled workout entities
// ABOUTME: Structured exercise lists plus calendar-bound workout instances
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One exercise inside a workout's structured exercise list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Repetitions, free-form ("12" or "8-12")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    /// Rest between sets, free-form ("60s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
}

/// A workout owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Workout id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Title
    pub title: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sport code
    pub sport: String,
    /// Duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Workout type (strength, intervals, recovery, ...)
    pub workout_type: String,
    /// Structured exercise list
    pub exercises: Vec<Exercise>,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Title
    pub title: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sport code
    pub sport: String,
    /// Duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Workout type
    pub workout_type: String,
    /// Structured exercise list
    pub exercises: Vec<Exercise>,
}

/// A workout instance bound to a calendar date.
///
/// At most loosely one per date per time-of-day slot; nothing enforces
/// uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    /// Scheduled workout id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Title
    pub title: String,
    /// Sport code
    pub sport: String,
    /// Workout type
    pub workout_type: String,
    /// Calendar date this instance is bound to
    pub scheduled_date: NaiveDate,
    /// Time-of-day slot ("morning", "evening"), when planned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_time_of_day: Option<String>,
    /// Link to a generated workout row, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Uuid>,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Skipped flag
    #[serde(default)]
    pub skipped: bool,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
