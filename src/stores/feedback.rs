// ABOUTME: Feedback client for the send-feedback serverless function
// ABOUTME: Blank feedback is rejected client-side before the function sees it
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Feedback client
//!
//! Submits user feedback through the transactional-email function. Non-empty
//! content is enforced on both sides of the wire: here before invoking, and
//! by the function itself.

use serde_json::{json, Value};

use crate::constants::functions;
use crate::context::{AuthContext, DataContext};
use pulsetrack_core::errors::{AppError, AppResult};

/// Client for the feedback email function
pub struct FeedbackClient {
    auth: AuthContext,
    data: DataContext,
}

impl FeedbackClient {
    /// Create a client
    #[must_use]
    pub const fn new(auth: AuthContext, data: DataContext) -> Self {
        Self { auth, data }
    }

    /// Send feedback and return the email provider's raw send result.
    ///
    /// # Errors
    ///
    /// Returns an error when the feedback is blank (client-side check), or
    /// when the function or the email provider rejects the send.
    pub async fn send(&self, feedback: &str, feedback_type: &str) -> AppResult<Value> {
        if feedback.trim().is_empty() {
            return Err(AppError::invalid_input("feedback must not be blank"));
        }

        let user = self.auth.current_user().await?;
        let body = json!({
            "feedback": feedback,
            "feedbackType": feedback_type,
            "userEmail": user.as_ref().and_then(|u| u.email.clone()),
            "userId": user.as_ref().map(|u| u.id),
        });

        self.data
            .gateway()
            .invoke_function(functions::SEND_FEEDBACK, body)
            .await
    }
}
