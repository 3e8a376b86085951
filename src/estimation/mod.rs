//! Estimation gateway
//!
//! Narrow boundary to the external reasoning service that turns free-text
//! meal and workout descriptions into structured numeric estimates. The
//! aggregator only appends an entry after an estimate comes back, so a failed
//! call never touches the log.

pub mod gemini;

pub use gemini::GeminiEstimator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Nutrition;

/// Estimation error types
#[derive(Debug, Error)]
pub enum EstimationError {
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("estimation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("estimation request timed out")]
    Timeout,

    #[error("estimation service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not parse estimate from model output: {0}")]
    Malformed(String),
}

/// Result type for estimation operations
pub type EstimationResult<T> = Result<T, EstimationError>;

/// What kind of description is being estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateKind {
    Meal,
    Workout,
}

/// A free-text description to estimate
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub text: String,
    pub kind: EstimateKind,
    /// Profile summary sent with workout estimates (weight, age, gender)
    pub profile_context: Option<String>,
}

/// Structured numeric estimate returned by the reasoning service
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Meal(Nutrition),
    Workout { calories_burned: f64 },
}

/// Inputs for the daily coach advice completion
#[derive(Debug, Clone)]
pub struct AdviceContext {
    pub profile_summary: String,
    pub goal: String,
    pub calorie_target: f64,
    pub adjusted_calorie_target: f64,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub meals_summary: String,
    pub workouts_summary: String,
}

/// External reasoning service boundary
#[async_trait]
pub trait Estimator: Send + Sync {
    /// Estimate nutrition or energy expenditure for a free-text description
    async fn estimate(&self, request: &EstimateRequest) -> EstimationResult<Estimate>;

    /// Generate daily coaching advice from the day's summary
    async fn advise(&self, context: &AdviceContext) -> EstimationResult<String>;
}
