//! Daily Coach MCP Tool
//!
//! Builds the day's summary and asks the reasoning service for coaching
//! advice: an insight on progress, a next-meal suggestion, and a recovery tip.

use chrono::Local;
use serde::Serialize;

use crate::estimation::{AdviceContext, Estimator};
use crate::session::Session;
use crate::targets;

/// Response for get_coach_advice
#[derive(Debug, Serialize)]
pub struct CoachAdviceResponse {
    pub date: String,
    pub advice: String,
}

/// Generate daily coaching advice from the current log and targets
pub async fn get_coach_advice(
    session: &mut Session,
    estimator: &dyn Estimator,
) -> Result<CoachAdviceResponse, String> {
    session.roll_over_if_needed(Local::now().date_naive());

    let profile = session
        .profile
        .as_ref()
        .ok_or_else(|| "No profile set. Call set_profile first".to_string())?;

    if session.log.meals().is_empty() {
        return Err("Log at least one meal before asking for advice".to_string());
    }

    let totals = session.log.totals();
    let calorie_target = targets::calorie_target(profile).map_err(|e| e.to_string())?;

    let meals_summary = session
        .log
        .meals()
        .iter()
        .map(|m| format!("{}: {}", m.meal_type.display_name(), m.description))
        .collect::<Vec<_>>()
        .join("; ");

    let workouts_summary = if session.log.workouts().is_empty() {
        "None".to_string()
    } else {
        session
            .log
            .workouts()
            .iter()
            .map(|w| w.description.clone())
            .collect::<Vec<_>>()
            .join("; ")
    };

    let context = AdviceContext {
        profile_summary: profile.summary(),
        goal: profile.goal.as_str().to_string(),
        calorie_target,
        adjusted_calorie_target: calorie_target + totals.calories_burned,
        calories_consumed: totals.calories_consumed,
        calories_burned: totals.calories_burned,
        meals_summary,
        workouts_summary,
    };

    let advice = estimator
        .advise(&context)
        .await
        .map_err(|e| format!("Could not generate advice: {}", e))?;

    Ok(CoachAdviceResponse {
        date: session.log.date().to_string(),
        advice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::testing::MockEstimator;
    use crate::models::{ActivityLevel, Gender, Goal, Profile};
    use crate::tools::log::log_meal;

    fn session_with_profile() -> Session {
        let mut s = Session::new(Local::now().date_naive());
        s.profile = Some(Profile {
            height_cm: 170.0,
            weight_kg: 70.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::Maintain,
            hydration_goal_ml: 2000.0,
        });
        s
    }

    #[tokio::test]
    async fn test_advice_requires_profile_and_meal() {
        let estimator = MockEstimator::default();

        let mut session = Session::new(Local::now().date_naive());
        assert!(get_coach_advice(&mut session, &estimator).await.is_err());

        let mut session = session_with_profile();
        let err = get_coach_advice(&mut session, &estimator).await.unwrap_err();
        assert!(err.contains("at least one meal"));
    }

    #[tokio::test]
    async fn test_advice_returns_model_text() {
        let estimator = MockEstimator::default();
        let mut session = session_with_profile();

        log_meal(&mut session, &estimator, "greek salad", "lunch").await.unwrap();

        let response = get_coach_advice(&mut session, &estimator).await.unwrap();
        assert_eq!(response.advice, "Keep it up.");
    }
}
