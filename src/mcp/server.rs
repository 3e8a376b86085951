//! Coach MCP Server Implementation
//!
//! Implements the MCP server with all coaching tools. One session's state
//! (profile + daily log) lives behind a mutex for the life of the process.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::estimation::Estimator;
use crate::session::Session;
use crate::tools::status::StatusTracker;
use crate::tools::{coach, dashboard, log, profile};

/// Coach MCP Service
#[derive(Clone)]
pub struct CoachService {
    session: Arc<Mutex<Session>>,
    estimator: Arc<dyn Estimator>,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<CoachService>,
}

impl CoachService {
    pub fn new(estimator: Arc<dyn Estimator>) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            session: Arc::new(Mutex::new(Session::new(today))),
            estimator,
            status_tracker: Arc::new(StatusTracker::new()),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    pub age: u32,
    /// Gender: male or female
    pub gender: String,
    /// Activity level: sedentary, lightly_active, moderately_active, or very_active
    pub activity_level: String,
    /// Primary goal: lose, gain, or maintain
    pub goal: String,
    /// Daily hydration goal in milliliters (default 2000)
    pub hydration_goal_ml: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    /// Free-text description of the meal (e.g., "a bowl of oatmeal with berries")
    pub description: String,
    /// Meal type: breakfast, breakfast_snack, lunch, evening_snack, dinner, dessert, or unspecified
    #[serde(default = "default_meal_type")]
    pub meal_type: String,
}

fn default_meal_type() -> String { "unspecified".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogWorkoutParams {
    /// Free-text description of the workout (e.g., "30 minutes of jogging")
    pub description: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogHydrationParams {
    /// Amount of water in milliliters
    pub amount_ml: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveEntryParams {
    /// Entry kind: meal, workout, or hydration
    pub kind: String,
    /// Entry id as returned by the log tools
    pub id: u64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CoachService {
    // --- Status ---

    #[tool(description = "Get the current status of the coach service including build info, process information, and session entry counts")]
    async fn coach_status(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        let status = self.status_tracker.get_status(&session);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Profile ---

    #[tool(description = "Set or replace the user profile (body metrics, activity level, goal). Returns the computed BMR, TDEE, and daily calorie/macro targets.")]
    async fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = profile::set_profile(
            &mut session, p.height_cm, p.weight_kg, p.age,
            &p.gender, &p.activity_level, &p.goal, p.hydration_goal_ml,
        ).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the current user profile")]
    async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        let result = profile::get_profile(&session).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(profile) => serde_json::to_string_pretty(&profile),
            None => Ok(r#"{"error": "No profile set"}"#.to_string()),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Logging ---

    #[tool(description = "Log a meal from a free-text description. The description is analyzed by the AI nutrition estimator; on success the meal is appended to today's log with its estimated calories and macros.")]
    async fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = log::log_meal(&mut session, self.estimator.as_ref(), &p.description, &p.meal_type)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Log a workout from a free-text description. Calories burned are estimated by the AI using the user's profile; requires set_profile first.")]
    async fn log_workout(&self, Parameters(p): Parameters<LogWorkoutParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = log::log_workout(&mut session, self.estimator.as_ref(), &p.description)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Log water intake in milliliters")]
    async fn log_hydration(&self, Parameters(p): Parameters<LogHydrationParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = log::log_hydration(&mut session, p.amount_ml)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get today's full log: meals, workouts, hydration, and running totals")]
    async fn get_daily_log(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = log::get_daily_log(&mut session).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove a logged entry by kind (meal, workout, or hydration) and id")]
    async fn remove_entry(&self, Parameters(p): Parameters<RemoveEntryParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = log::remove_entry(&mut session, &p.kind, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Clear today's log (day rollover). Irreversible.")]
    async fn reset_day(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = log::reset_day(&mut session).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Dashboard ---

    #[tool(description = "Get the daily dashboard: totals, calorie target adjusted for workouts, remaining calories and macros, and hydration progress. Requires set_profile first.")]
    async fn get_dashboard(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = dashboard::get_dashboard(&mut session)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Coach ---

    #[tool(description = "Get AI coaching advice for today: a progress insight, a next-meal suggestion, and a recovery tip. Requires a profile and at least one logged meal.")]
    async fn get_coach_advice(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = coach::get_coach_advice(&mut session, self.estimator.as_ref())
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CoachService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "dietcoach".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("AI Diet & Fitness Coach".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "AI Diet & Fitness Coach - meal, workout, and hydration tracking with goal deltas. \
                 Start with set_profile (height, weight, age, gender, activity level, goal). \
                 Log with log_meal/log_workout (free text, analyzed by the AI estimator) and log_hydration. \
                 Review with get_daily_log and get_dashboard (targets, remaining calories/macros, hydration progress). \
                 Edit with remove_entry; reset_day clears today's log. \
                 get_coach_advice returns an insight, next-meal suggestion, and recovery tip. \
                 All state is in-memory for this session only."
                    .into(),
            ),
        }
    }
}
