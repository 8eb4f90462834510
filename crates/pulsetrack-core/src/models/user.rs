// ABOUTME: Authenticated user identity model
// ABOUTME: Minimal identity + email pair owned by the authentication subsystem
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the signed-in user as reported by the authentication subsystem.
///
/// Every other entity references this identity via its `user_id` foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user identifier
    pub id: Uuid,
    /// Email address, when the auth subsystem exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthUser {
    /// Create a new user identity
    #[must_use]
    pub const fn new(id: Uuid, email: Option<String>) -> Self {
        Self { id, email }
    }
}
