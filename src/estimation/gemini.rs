//! Gemini estimation backend
//!
//! Calls the Google Generative Language API to turn meal and workout
//! descriptions into numeric estimates. The model is instructed to answer
//! with a bare JSON object; extraction takes the first `{` to the last `}`
//! of the reply, since models occasionally wrap the object in prose or
//! code fences.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::models::Nutrition;

use super::{
    AdviceContext, Estimate, EstimateKind, EstimateRequest, EstimationError, EstimationResult,
    Estimator,
};

/// Environment variable for the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Timeout applied to every estimation call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Prompts
// ============================================================================

fn meal_prompt(description: &str) -> String {
    format!(
        "You are a nutrition analysis expert. Analyze the following meal description \
         and provide a reasonable estimate for its nutritional content. Your response \
         MUST be ONLY a JSON object with the keys 'calories', 'protein_g', 'carbs_g', \
         and 'fats_g'.\n\nMeal: {description}\n\nJSON Output:"
    )
}

fn workout_prompt(description: &str, profile_context: &str) -> String {
    format!(
        "You are a fitness expert. Analyze the following workout description and the \
         user's profile to provide a reasonable estimate for calories burned. The \
         user's profile is: {profile_context}. Your response MUST be ONLY a JSON \
         object with the key 'calories_burned'.\n\nWorkout: {description}\n\nJSON Output:"
    )
}

fn advice_prompt(context: &AdviceContext) -> String {
    format!(
        "You are an encouraging and helpful AI Diet Coach. Your goal is to provide \
         actionable insights and suggestions based on the user's progress today. \
         Keep your tone positive and motivating.\n\n\
         Here is the user's data for today:\n\
         ------------------------\n\
         User Profile: {profile}\n\
         Primary Goal: {goal}\n\
         Original Daily Calorie Target: {target:.0} kcal\n\
         Workouts Logged Today: {workouts}\n\
         Calories Burned from Workouts: {burned:.0} kcal\n\
         Adjusted Daily Calorie Target (Original + Burned): {adjusted:.0} kcal\n\
         Meals Logged Today: {meals}\n\
         Total Consumption Today: {consumed:.0} kcal consumed\n\
         ------------------------\n\n\
         Based on all the information above, please provide the following in a clear, \
         structured Markdown format:\n\
         1. **Insight:** A brief, positive analysis of their progress. Mention their \
         workout and compare their consumption to their Adjusted Calorie Target.\n\
         2. **Next Meal Suggestion:** Suggest a specific, healthy meal or snack \
         suitable for their remaining calories.\n\
         3. **Recovery Tip:** A short tip related to their workout, like stretching \
         or hydration.",
        profile = context.profile_summary,
        goal = context.goal,
        target = context.calorie_target,
        workouts = context.workouts_summary,
        burned = context.calories_burned,
        adjusted = context.adjusted_calorie_target,
        meals = context.meals_summary,
        consumed = context.calories_consumed,
    )
}

// ============================================================================
// Response Parsing
// ============================================================================

/// Extract the JSON object span from a model reply (first `{` to last `}`)
fn extract_json_object(text: &str) -> EstimationResult<&str> {
    let start = text
        .find('{')
        .ok_or_else(|| EstimationError::Malformed("no JSON object in reply".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| EstimationError::Malformed("unterminated JSON object in reply".to_string()))?;
    Ok(&text[start..=end])
}

/// Read a numeric field, rejecting non-finite and negative values
fn numeric_field(value: &serde_json::Value, key: &str) -> EstimationResult<Option<f64>> {
    match value.get(key) {
        None => Ok(None),
        Some(v) => {
            let n = v.as_f64().ok_or_else(|| {
                EstimationError::Malformed(format!("'{key}' is not a number"))
            })?;
            if !n.is_finite() || n < 0.0 {
                return Err(EstimationError::Malformed(format!(
                    "'{key}' is out of range: {n}"
                )));
            }
            Ok(Some(n))
        }
    }
}

/// Parse a meal estimate. Calories are required; missing macro keys default
/// to zero, matching how partial model answers are treated upstream.
fn parse_meal_estimate(reply: &str) -> EstimationResult<Nutrition> {
    let object = extract_json_object(reply)?;
    let value: serde_json::Value = serde_json::from_str(object)
        .map_err(|e| EstimationError::Malformed(format!("invalid JSON: {e}")))?;

    let calories = numeric_field(&value, "calories")?
        .ok_or_else(|| EstimationError::Malformed("missing 'calories'".to_string()))?;

    Ok(Nutrition {
        calories,
        protein_g: numeric_field(&value, "protein_g")?.unwrap_or(0.0),
        carbs_g: numeric_field(&value, "carbs_g")?.unwrap_or(0.0),
        fat_g: numeric_field(&value, "fats_g")?.unwrap_or(0.0),
    })
}

/// Parse a workout estimate
fn parse_workout_estimate(reply: &str) -> EstimationResult<f64> {
    let object = extract_json_object(reply)?;
    let value: serde_json::Value = serde_json::from_str(object)
        .map_err(|e| EstimationError::Malformed(format!("invalid JSON: {e}")))?;

    numeric_field(&value, "calories_burned")?
        .ok_or_else(|| EstimationError::Malformed("missing 'calories_burned'".to_string()))
}

// ============================================================================
// Estimator Implementation
// ============================================================================

/// Gemini-backed estimator
pub struct GeminiEstimator {
    api_key: String,
    client: Client,
    model: String,
}

impl GeminiEstimator {
    /// Create a new estimator with an API key
    pub fn new(api_key: impl Into<String>) -> EstimationResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_key: api_key.into(),
            client,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Create an estimator from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> EstimationResult<Self> {
        let api_key =
            env::var(GEMINI_API_KEY_ENV).map_err(|_| EstimationError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Override the default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send a single-turn prompt and return the model's text reply
    async fn generate(&self, prompt: String) -> EstimationResult<String> {
        let url = format!(
            "{API_BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![ContentPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EstimationError::Timeout
                } else {
                    EstimationError::Http(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(EstimationError::Http)?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(EstimationError::Api {
                status: status.as_u16(),
                message: truncate(&body, 500),
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| EstimationError::Malformed(format!("invalid response body: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(EstimationError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        parsed
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| EstimationError::Malformed("response contained no text".to_string()))
    }
}

#[async_trait]
impl Estimator for GeminiEstimator {
    async fn estimate(&self, request: &EstimateRequest) -> EstimationResult<Estimate> {
        match request.kind {
            EstimateKind::Meal => {
                let reply = self.generate(meal_prompt(&request.text)).await?;
                let nutrition = parse_meal_estimate(&reply)?;
                debug!(calories = nutrition.calories, "Parsed meal estimate");
                Ok(Estimate::Meal(nutrition))
            }
            EstimateKind::Workout => {
                let context = request.profile_context.as_deref().unwrap_or("unknown");
                let reply = self.generate(workout_prompt(&request.text, context)).await?;
                let calories_burned = parse_workout_estimate(&reply)?;
                debug!(calories_burned, "Parsed workout estimate");
                Ok(Estimate::Workout { calories_burned })
            }
        }
    }

    async fn advise(&self, context: &AdviceContext) -> EstimationResult<String> {
        self.generate(advice_prompt(context)).await
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}
