// ABOUTME: Main library entry point for the PulseTrack client sync library
// ABOUTME: Client-side data synchronization and state reconciliation for the PulseTrack fitness app
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # PulseTrack Client Sync
//!
//! Client-side data-synchronization and state-reconciliation library for the
//! PulseTrack fitness application. Entity state (profiles, goals, workouts,
//! onboarding, device health data) lives in the remote store; this crate
//! holds ephemeral, re-derivable copies behind typed state stores and
//! reconciles them through an abstract data gateway.
//!
//! ## Architecture
//!
//! - **Gateway**: [`gateway::DataGateway`] abstracts the hosted backend
//!   (table reads/writes, serverless function invocation, auth session), with
//!   a REST backend speaking Supabase conventions and an in-process backend
//!   for tests.
//! - **Health**: [`health::HealthCapability`] abstracts the native device
//!   health plugin (steps, heart rate, sleep, permission handshake).
//! - **Stores**: per-domain state holders that load entity state, expose
//!   mutation operations, and track loading flags. Load cycles are
//!   generation-guarded so stale responses never overwrite fresher state.
//! - **Contexts**: focused dependency injection ([`context::AuthContext`],
//!   [`context::DataContext`]); no ambient singletons, every store receives
//!   its collaborators explicitly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pulsetrack::context::{AuthContext, DataContext};
//! use pulsetrack::gateway::MemoryGateway;
//! use pulsetrack::health::SyntheticHealthProvider;
//! use pulsetrack::stores::OnboardingGate;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = Arc::new(MemoryGateway::new());
//!     let health = Arc::new(SyntheticHealthProvider::new());
//!     let auth = AuthContext::new(gateway.clone());
//!     let data = DataContext::new(gateway, health);
//!
//!     let gate = OnboardingGate::new(auth, data);
//!     gate.load().await;
//!     println!("needs onboarding: {}", gate.needs_onboarding().await);
//! }
//! ```

/// Environment-based client configuration
pub mod config;

/// Application constants: table names, function names, defaults
pub mod constants;

/// Focused dependency injection contexts
pub mod context;

/// Remote data gateway abstraction with REST and in-memory backends
pub mod gateway;

/// External health capability abstraction and synthetic provider
pub mod health;

/// Structured logging setup
pub mod logging;

/// Entity-loading state stores
pub mod stores;

pub use pulsetrack_core::errors::{AppError, AppResult, ErrorCode};
pub use pulsetrack_core::models;
