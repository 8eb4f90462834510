// ABOUTME: Foundation crate for the PulseTrack client sync library
// ABOUTME: Holds domain models and the unified error type shared across the workspace
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # PulseTrack Core
//!
//! Foundation types for the PulseTrack client synchronization library:
//!
//! - [`errors`]: unified [`errors::AppError`] with standard error codes and
//!   HTTP status mapping
//! - [`models`]: domain entities (profiles, sport profiles, goals, workouts,
//!   scheduled workouts, health snapshots) owned by the remote store and held
//!   client-side as ephemeral, re-derivable copies

/// Unified error handling with standard error codes
pub mod errors;

/// Domain entities for the fitness data model
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
