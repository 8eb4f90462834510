// ABOUTME: Onboarding gate deciding whether to show the first-run setup flow
// ABOUTME: Derived from the profile's onboarding_completed flag, failing open toward setup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Onboarding gate
//!
//! One derived boolean: does this user still need the setup flow? Absence of
//! a profile row and read failures both resolve to "yes": showing setup to
//! a configured user is recoverable, skipping it for a fresh one is not.

use tracing::{error, warn};

use crate::context::{AuthContext, DataContext};
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::ProfileUpdate;

use super::loader::Loader;

/// Gate deciding whether the setup flow is shown
pub struct OnboardingGate {
    auth: AuthContext,
    data: DataContext,
    loader: Loader<bool>,
}

impl OnboardingGate {
    /// Create a gate; call [`Self::load`] to resolve it
    #[must_use]
    pub fn new(auth: AuthContext, data: DataContext) -> Self {
        Self {
            auth,
            data,
            loader: Loader::new(),
        }
    }

    /// Resolve the gate for the current user.
    ///
    /// Anonymous sessions skip the fetch entirely and settle immediately.
    pub async fn load(&self) {
        let generation = self.loader.begin();

        let user = match self.auth.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "auth lookup failed; treating session as anonymous");
                None
            }
        };
        let Some(user) = user else {
            self.loader.commit(generation, false).await;
            return;
        };

        let needs = match self.data.gateway().get_profile(user.id).await {
            Ok(Some(profile)) => !profile.onboarding_completed,
            Ok(None) => true,
            Err(e) => {
                error!(error = %e, user_id = %user.id, "error checking onboarding status");
                true
            }
        };
        self.loader.commit(generation, needs).await;
    }

    /// Re-resolve the gate (e.g. after the user identity changed)
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Whether the setup flow should be shown; `false` until resolved
    pub async fn needs_onboarding(&self) -> bool {
        self.loader.value_or(false).await
    }

    /// Whether the gate is still resolving
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Local-only optimistic transition: the setup flow has just finished.
    ///
    /// No network round-trip; the flow itself already persisted the flag.
    pub async fn complete_onboarding(&self) {
        self.loader.force(false).await;
    }

    /// Reset onboarding: clear the completed flag and preferences on the
    /// profile, then delete the sport profile row.
    ///
    /// Both steps are checked; the gate only flips once both succeed.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when either write fails.
    pub async fn reset_onboarding(&self) -> AppResult<()> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        self.data
            .gateway()
            .update_profile(user.id, &ProfileUpdate::clear_onboarding())
            .await?;
        self.data.gateway().delete_sport_profile(user.id).await?;

        self.loader.force(true).await;
        Ok(())
    }
}
