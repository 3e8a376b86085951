//! Dashboard MCP Tool
//!
//! Assembles the day's totals, targets, and remaining values for the
//! presentation layer. The calorie progress fraction is capped at 1.0 for
//! progress-bar display; hydration progress is reported uncapped so an
//! exceeded goal stays visible.

use chrono::Local;
use serde::Serialize;

use crate::session::{DayTotals, Session};
use crate::targets::{self, MacroRemaining, MacroTargets};

/// Response for get_dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: String,
    pub totals: DayTotals,
    pub calorie_target: f64,
    /// Calorie target plus calories burned from workouts
    pub adjusted_calorie_target: f64,
    pub calories_remaining: f64,
    /// Consumed over adjusted target, capped at 1.0
    pub calorie_progress: f64,
    pub macro_targets: MacroTargets,
    pub macro_remaining: MacroRemaining,
    pub hydration_goal_ml: f64,
    /// Hydration over goal, uncapped (above 1.0 means goal exceeded)
    pub hydration_progress: f64,
    pub meal_count: usize,
    pub workout_count: usize,
    pub hydration_count: usize,
}

/// Compute the daily dashboard
pub fn get_dashboard(session: &mut Session) -> Result<DashboardResponse, String> {
    session.roll_over_if_needed(Local::now().date_naive());

    let profile = session
        .profile
        .as_ref()
        .ok_or_else(|| "No profile set. Call set_profile first".to_string())?;

    let totals = session.log.totals();

    let calorie_target = targets::calorie_target(profile).map_err(|e| e.to_string())?;
    let calories_remaining =
        targets::remaining_calories(profile, &totals).map_err(|e| e.to_string())?;
    let macro_targets = targets::macro_targets(profile).map_err(|e| e.to_string())?;
    let macro_remaining =
        targets::macro_remaining(profile, &totals).map_err(|e| e.to_string())?;

    let adjusted_calorie_target = calorie_target + totals.calories_burned;
    let calorie_progress = calorie_progress(totals.calories_consumed, adjusted_calorie_target);
    let hydration_progress = targets::hydration_progress(profile, &totals);

    Ok(DashboardResponse {
        date: session.log.date().to_string(),
        calorie_target,
        adjusted_calorie_target,
        calories_remaining,
        calorie_progress,
        macro_targets,
        macro_remaining,
        hydration_goal_ml: profile.hydration_goal_ml,
        hydration_progress,
        meal_count: session.log.meals().len(),
        workout_count: session.log.workouts().len(),
        hydration_count: session.log.hydration().len(),
        totals,
    })
}

fn calorie_progress(consumed: f64, adjusted_target: f64) -> f64 {
    if adjusted_target <= 0.0 {
        return 0.0;
    }
    (consumed / adjusted_target).min(1.0)
}
