// ABOUTME: Coach Q&A client for the ask-workout-question serverless function
// ABOUTME: Typed request building and answer extraction over the gateway's invoke surface
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Coach Q&A client
//!
//! Thin typed client for the AI workout Q&A function. The function requires
//! a bearer-authenticated caller, proxies the question to the AI model with
//! workout context, and persists the Q&A row best-effort on its side; this
//! client only sees the answer or the wrapped error.

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::constants::functions;
use crate::context::DataContext;
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::Workout;

/// Successful answer payload from the Q&A function
#[derive(Debug, Deserialize)]
struct AnswerResponse {
    answer: String,
}

/// Client for the AI workout Q&A function
pub struct CoachClient {
    data: DataContext,
}

impl CoachClient {
    /// Create a client
    #[must_use]
    pub const fn new(data: DataContext) -> Self {
        Self { data }
    }

    /// Ask a question about a workout and return the coach's answer.
    ///
    /// # Errors
    ///
    /// Returns an error when the question is blank, the caller is
    /// unauthenticated (401 from the function), or the AI service is
    /// misconfigured or fails (500 from the function).
    pub async fn ask(
        &self,
        question: &str,
        workout: Option<&Workout>,
        sport: Option<&str>,
        workout_id: Option<Uuid>,
    ) -> AppResult<String> {
        if question.trim().is_empty() {
            return Err(AppError::invalid_input("question must not be blank"));
        }

        let workout_data = workout.map(|w| {
            json!({
                "title": w.title,
                "sport": w.sport,
                "duration": w.duration,
                "type": w.workout_type,
                "exercises": w.exercises,
            })
        });
        let body = json!({
            "question": question,
            "workoutData": workout_data,
            "sport": sport,
            "workoutId": workout_id,
        });

        let response = self
            .data
            .gateway()
            .invoke_function(functions::ASK_WORKOUT_QUESTION, body)
            .await?;
        let answer: AnswerResponse = serde_json::from_value(response)?;
        Ok(answer.answer)
    }
}
