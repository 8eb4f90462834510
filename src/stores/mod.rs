// ABOUTME: Entity-loading state stores for the PulseTrack client
// ABOUTME: Per-domain state holders reconciling remote entity state with loading flags
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Entity-loading state stores
//!
//! Each store loads its entity for the current user, exposes mutation
//! operations, and tracks a loading flag distinct from "empty". Load cycles
//! are generation-guarded: a response from a superseded cycle is discarded
//! instead of overwriting fresher state.
//!
//! Read failures are logged and swallowed (state keeps its last-known value
//! or a conservative default); user-initiated mutations surface their errors
//! to the caller.

pub mod coach;
pub mod feedback;
pub mod goals;
pub mod health_data;
pub mod loader;
pub mod onboarding;
pub mod profile;
pub mod sport_profile;
pub mod workouts;

pub use coach::CoachClient;
pub use feedback::FeedbackClient;
pub use goals::GoalStore;
pub use health_data::HealthDataStore;
pub use loader::{LoadState, Loader};
pub use onboarding::OnboardingGate;
pub use profile::ProfileStore;
pub use sport_profile::{sport_info, SportProfileStore};
pub use workouts::WorkoutStore;
