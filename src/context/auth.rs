// ABOUTME: Auth context for dependency injection of the session surface
// ABOUTME: Wraps the gateway's auth pair behind a focused handle
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::gateway::DataGateway;
use pulsetrack_core::errors::AppResult;
use pulsetrack_core::models::AuthUser;
use std::sync::Arc;

/// Auth context exposing the session surface of the gateway.
///
/// The session itself is owned by the authentication subsystem; stores only
/// read the current identity through this handle.
#[derive(Clone)]
pub struct AuthContext {
    gateway: Arc<dyn DataGateway>,
}

impl AuthContext {
    /// Create new auth context
    #[must_use]
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    /// Identity of the signed-in user, `None` for anonymous sessions.
    ///
    /// # Errors
    ///
    /// Returns an error when the auth subsystem cannot be reached.
    pub async fn current_user(&self) -> AppResult<Option<AuthUser>> {
        self.gateway.current_user().await
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns an error when the auth subsystem rejects the sign-out.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.gateway.sign_out().await
    }
}
