// ABOUTME: Display profile entity and partial-update payload
// ABOUTME: One-to-one with the user; never deleted, only updated
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display profile for a user.
///
/// One-to-one with [`super::AuthUser`], keyed by the same id. Mutated by user
/// edits and by the onboarding flow; rows are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Profile id, identical to the owning user's id
    pub id: Uuid,
    /// Email address mirrored from the auth subsystem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Unique handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Whether the first-run setup flow has been completed
    #[serde(default)]
    pub onboarding_completed: bool,
    /// Free-form preferences blob collected during onboarding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create an empty profile row for a freshly signed-up user
    #[must_use]
    pub fn new(user_id: Uuid, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: user_id,
            email,
            full_name: None,
            username: None,
            avatar_url: None,
            onboarding_completed: false,
            preferences: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update payload for a profile row.
///
/// Absent fields are left untouched by the gateway; `preferences` accepts an
/// explicit JSON `null` to clear the stored blob (used when onboarding is
/// reset).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New avatar reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// New onboarding-completed flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
    /// New preferences blob; `Some(Value::Null)` clears it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
}

impl ProfileUpdate {
    /// Update that clears onboarding state: completed flag off, preferences null
    #[must_use]
    pub fn clear_onboarding() -> Self {
        Self {
            onboarding_completed: Some(false),
            preferences: Some(serde_json::Value::Null),
            ..Self::default()
        }
    }

    /// Apply this update to an in-memory profile row
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(full_name) = &self.full_name {
            profile.full_name = Some(full_name.clone());
        }
        if let Some(username) = &self.username {
            profile.username = Some(username.clone());
        }
        if let Some(avatar_url) = &self.avatar_url {
            profile.avatar_url = Some(avatar_url.clone());
        }
        if let Some(completed) = self.onboarding_completed {
            profile.onboarding_completed = completed;
        }
        if let Some(preferences) = &self.preferences {
            profile.preferences = if preferences.is_null() {
                None
            } else {
                Some(preferences.clone())
            };
        }
        profile.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_onboarding_resets_flag_and_preferences() {
        let mut profile = Profile::new(Uuid::new_v4(), None);
        profile.onboarding_completed = true;
        profile.preferences = Some(serde_json::json!({"units": "metric"}));

        ProfileUpdate::clear_onboarding().apply_to(&mut profile);

        assert!(!profile.onboarding_completed);
        assert!(profile.preferences.is_none());
    }

    #[test]
    fn test_absent_fields_leave_row_untouched() {
        let mut profile = Profile::new(Uuid::new_v4(), Some("a@b.c".into()));
        profile.full_name = Some("Alex".into());

        ProfileUpdate {
            username: Some("alex99".into()),
            ..ProfileUpdate::default()
        }
        .apply_to(&mut profile);

        assert_eq!(profile.full_name.as_deref(), Some("Alex"));
        assert_eq!(profile.username.as_deref(), Some("alex99"));
    }
}
