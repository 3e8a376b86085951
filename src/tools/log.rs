//! Logging MCP Tools
//!
//! Tools for logging meals, workouts, and hydration, and for reading and
//! editing the current day's log. Estimation happens before anything is
//! appended, so a failed call leaves the log untouched.

use chrono::Local;
use serde::Serialize;

use crate::estimation::{Estimate, EstimateKind, EstimateRequest, Estimator};
use crate::models::{
    HydrationEntry, HydrationEntryCreate, MealEntry, MealEntryCreate, MealType, Nutrition,
    WorkoutEntry, WorkoutEntryCreate,
};
use crate::session::{DayTotals, Session};
use crate::targets;

/// Response for log_meal
#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub id: u64,
    pub date: String,
    pub meal_type: String,
    pub description: String,
    pub nutrition: Nutrition,
    pub calories_consumed_today: f64,
}

/// Response for log_workout
#[derive(Debug, Serialize)]
pub struct LogWorkoutResponse {
    pub id: u64,
    pub date: String,
    pub description: String,
    pub calories_burned: f64,
    pub calories_burned_today: f64,
}

/// Response for log_hydration
#[derive(Debug, Serialize)]
pub struct LogHydrationResponse {
    pub id: u64,
    pub date: String,
    pub amount_ml: f64,
    pub hydration_total_ml: f64,
    /// Present when a profile with a hydration goal is set
    pub hydration_progress: Option<f64>,
}

/// Full day log for detailed view
#[derive(Debug, Serialize)]
pub struct DailyLogResponse {
    pub date: String,
    pub meals: Vec<MealEntry>,
    pub workouts: Vec<WorkoutEntry>,
    pub hydration: Vec<HydrationEntry>,
    pub totals: DayTotals,
}

/// Response for remove_entry
#[derive(Debug, Serialize)]
pub struct RemoveEntryResponse {
    pub removed: bool,
    pub kind: String,
    pub id: u64,
    pub totals: DayTotals,
}

/// Response for reset_day
#[derive(Debug, Serialize)]
pub struct ResetDayResponse {
    pub date: String,
    pub cleared_entries: usize,
}

/// Estimate a free-text meal and append it to the day's log
pub async fn log_meal(
    session: &mut Session,
    estimator: &dyn Estimator,
    description: &str,
    meal_type: &str,
) -> Result<LogMealResponse, String> {
    let description = description.trim();
    if description.is_empty() {
        return Err("Meal description must not be empty".to_string());
    }

    session.roll_over_if_needed(Local::now().date_naive());

    let request = EstimateRequest {
        text: description.to_string(),
        kind: EstimateKind::Meal,
        profile_context: None,
    };
    let estimate = estimator
        .estimate(&request)
        .await
        .map_err(|e| format!("Could not analyze meal: {}", e))?;

    let nutrition = match estimate {
        Estimate::Meal(nutrition) => nutrition,
        Estimate::Workout { .. } => {
            return Err("Estimator returned a workout estimate for a meal".to_string())
        }
    };

    let entry = session
        .log
        .add_meal(MealEntryCreate {
            description: description.to_string(),
            meal_type: MealType::from_str(meal_type),
            nutrition,
        })
        .map_err(|e| format!("Rejected meal estimate: {}", e))?;

    tracing::info!(id = entry.id, calories = entry.nutrition.calories, "Meal logged");

    Ok(LogMealResponse {
        id: entry.id,
        date: session.log.date().to_string(),
        meal_type: entry.meal_type.as_str().to_string(),
        description: entry.description,
        nutrition: entry.nutrition,
        calories_consumed_today: session.log.totals().calories_consumed,
    })
}

/// Estimate a free-text workout and append it to the day's log
pub async fn log_workout(
    session: &mut Session,
    estimator: &dyn Estimator,
    description: &str,
) -> Result<LogWorkoutResponse, String> {
    let description = description.trim();
    if description.is_empty() {
        return Err("Workout description must not be empty".to_string());
    }

    session.roll_over_if_needed(Local::now().date_naive());

    // Workout estimates are scaled to the user's body, so a profile is needed
    let profile_context = match session.profile.as_ref() {
        Some(profile) => profile.summary(),
        None => {
            return Err(
                "Set a profile first: workout estimation uses weight, age, and gender".to_string(),
            )
        }
    };

    let request = EstimateRequest {
        text: description.to_string(),
        kind: EstimateKind::Workout,
        profile_context: Some(profile_context),
    };
    let estimate = estimator
        .estimate(&request)
        .await
        .map_err(|e| format!("Could not analyze workout: {}", e))?;

    let calories_burned = match estimate {
        Estimate::Workout { calories_burned } => calories_burned,
        Estimate::Meal(_) => {
            return Err("Estimator returned a meal estimate for a workout".to_string())
        }
    };

    let entry = session
        .log
        .add_workout(WorkoutEntryCreate {
            description: description.to_string(),
            calories_burned,
        })
        .map_err(|e| format!("Rejected workout estimate: {}", e))?;

    tracing::info!(id = entry.id, calories_burned, "Workout logged");

    Ok(LogWorkoutResponse {
        id: entry.id,
        date: session.log.date().to_string(),
        description: entry.description,
        calories_burned: entry.calories_burned,
        calories_burned_today: session.log.totals().calories_burned,
    })
}

/// Append a hydration entry to the day's log
pub fn log_hydration(session: &mut Session, amount_ml: f64) -> Result<LogHydrationResponse, String> {
    session.roll_over_if_needed(Local::now().date_naive());

    let entry = session
        .log
        .add_hydration(HydrationEntryCreate { amount_ml })
        .map_err(|e| format!("Rejected hydration entry: {}", e))?;

    let totals = session.log.totals();
    let hydration_progress = session
        .profile
        .as_ref()
        .map(|p| targets::hydration_progress(p, &totals));

    Ok(LogHydrationResponse {
        id: entry.id,
        date: session.log.date().to_string(),
        amount_ml: entry.amount_ml,
        hydration_total_ml: totals.hydration_ml,
        hydration_progress,
    })
}

/// Get the current day's full log
pub fn get_daily_log(session: &mut Session) -> Result<DailyLogResponse, String> {
    session.roll_over_if_needed(Local::now().date_naive());

    Ok(DailyLogResponse {
        date: session.log.date().to_string(),
        meals: session.log.meals().to_vec(),
        workouts: session.log.workouts().to_vec(),
        hydration: session.log.hydration().to_vec(),
        totals: session.log.totals(),
    })
}

/// Remove a logged entry by kind and id
pub fn remove_entry(session: &mut Session, kind: &str, id: u64) -> Result<RemoveEntryResponse, String> {
    session.roll_over_if_needed(Local::now().date_naive());

    let removed = match kind.to_lowercase().as_str() {
        "meal" => session.log.remove_meal(id),
        "workout" => session.log.remove_workout(id),
        "hydration" => session.log.remove_hydration(id),
        other => return Err(format!("Unknown entry kind '{}'. Use meal, workout, or hydration", other)),
    };

    Ok(RemoveEntryResponse {
        removed,
        kind: kind.to_lowercase(),
        id,
        totals: session.log.totals(),
    })
}

/// Clear the current day's log
pub fn reset_day(session: &mut Session) -> Result<ResetDayResponse, String> {
    let cleared_entries = session.log.entry_count();
    let today = Local::now().date_naive();
    session.log.reset(today);

    tracing::info!(cleared_entries, "Daily log reset");

    Ok(ResetDayResponse {
        date: today.to_string(),
        cleared_entries,
    })
}
