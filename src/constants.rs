// ABOUTME: Application constants for the PulseTrack client sync library
// ABOUTME: Table names, serverless function names, environment variables, and defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Centralized constants so table/function names are written exactly once.

/// Remote store table names
pub mod tables {
    /// Display profiles, one-to-one with users
    pub const PROFILES: &str = "profiles";
    /// Sport profiles collected during onboarding
    pub const SPORT_PROFILES: &str = "user_sport_profiles";
    /// User goals
    pub const GOALS: &str = "user_goals";
    /// Workouts with structured exercise lists
    pub const WORKOUTS: &str = "workouts";
    /// Calendar-bound workout instances
    pub const SCHEDULED_WORKOUTS: &str = "scheduled_workouts";
    /// Latest health snapshot per user (conflict key: user id)
    pub const HEALTH_SNAPSHOTS: &str = "smartwatch_data";
    /// Q&A rows persisted best-effort by the coach function
    pub const WORKOUT_QUESTIONS: &str = "workout_questions";
}

/// Serverless function names
pub mod functions {
    /// AI workout Q&A proxy
    pub const ASK_WORKOUT_QUESTION: &str = "ask-workout-question";
    /// Transactional feedback email
    pub const SEND_FEEDBACK: &str = "send-feedback";
}

/// Environment variable names read by [`crate::config::ClientConfig::from_env`]
pub mod env_config {
    /// Base URL of the hosted backend
    pub const GATEWAY_URL: &str = "PULSETRACK_GATEWAY_URL";
    /// Publishable (anon) API key sent with every request
    pub const GATEWAY_ANON_KEY: &str = "PULSETRACK_GATEWAY_ANON_KEY";
    /// Bearer token of the signed-in session, when one exists
    pub const ACCESS_TOKEN: &str = "PULSETRACK_ACCESS_TOKEN";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Log level override
    pub const LOG_LEVEL: &str = "RUST_LOG";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

/// Service identity used in logs
pub mod service_names {
    /// This library
    pub const PULSETRACK_CLIENT: &str = "pulsetrack-client";
}

/// Upsert conflict keys declared to the remote store
pub mod conflict_keys {
    /// Profiles conflict on the user id primary key
    pub const PROFILES: &str = "id";
    /// Sport profiles conflict on the owning user
    pub const SPORT_PROFILES: &str = "user_id";
    /// Health snapshots conflict on the owning user only: the latest
    /// snapshot survives per user, not per date
    pub const HEALTH_SNAPSHOTS: &str = "user_id";
}
