//! Profile MCP Tools
//!
//! Tools for setting and reading the session profile.

use serde::Serialize;

use crate::models::{
    ActivityLevel, Gender, Goal, Profile, DEFAULT_HYDRATION_GOAL_ML,
};
use crate::session::Session;
use crate::targets;

/// Response for set_profile
#[derive(Debug, Serialize)]
pub struct SetProfileResponse {
    pub profile: Profile,
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_target: f64,
    pub macro_targets: targets::MacroTargets,
}

/// Set or replace the session profile
pub fn set_profile(
    session: &mut Session,
    height_cm: f64,
    weight_kg: f64,
    age: u32,
    gender: &str,
    activity_level: &str,
    goal: &str,
    hydration_goal_ml: Option<f64>,
) -> Result<SetProfileResponse, String> {
    let gender = Gender::from_str(gender)
        .ok_or_else(|| format!("Unknown gender '{}'. Use male or female", gender))?;
    let activity_level = ActivityLevel::from_str(activity_level).ok_or_else(|| {
        format!(
            "Unknown activity level '{}'. Use sedentary, lightly_active, moderately_active, or very_active",
            activity_level
        )
    })?;
    let goal = Goal::from_str(goal)
        .ok_or_else(|| format!("Unknown goal '{}'. Use lose, gain, or maintain", goal))?;

    let hydration_goal_ml = hydration_goal_ml.unwrap_or(DEFAULT_HYDRATION_GOAL_ML);
    if !hydration_goal_ml.is_finite() || hydration_goal_ml <= 0.0 {
        return Err(format!(
            "hydration_goal_ml must be a positive number (got {})",
            hydration_goal_ml
        ));
    }

    let profile = Profile {
        height_cm,
        weight_kg,
        age,
        gender,
        activity_level,
        goal,
        hydration_goal_ml,
    };

    // Reject unusable body metrics up front so goal math can't fail later
    targets::check_complete(&profile).map_err(|e| e.to_string())?;

    let response = SetProfileResponse {
        bmr: targets::bmr(&profile).map_err(|e| e.to_string())?,
        tdee: targets::tdee(&profile).map_err(|e| e.to_string())?,
        calorie_target: targets::calorie_target(&profile).map_err(|e| e.to_string())?,
        macro_targets: targets::macro_targets(&profile).map_err(|e| e.to_string())?,
        profile: profile.clone(),
    };

    session.profile = Some(profile);
    Ok(response)
}

/// Get the current session profile
pub fn get_profile(session: &Session) -> Result<Option<Profile>, String> {
    Ok(session.profile.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session() -> Session {
        Session::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn test_set_profile_computes_targets() {
        let mut session = session();
        let response = set_profile(
            &mut session,
            170.0,
            70.0,
            30,
            "male",
            "moderately_active",
            "maintain",
            None,
        )
        .unwrap();

        assert!((response.bmr - 1617.5).abs() < 1e-9);
        assert!((response.calorie_target - 2507.125).abs() < 1e-9);
        assert_eq!(response.profile.hydration_goal_ml, DEFAULT_HYDRATION_GOAL_ML);
        assert!(session.profile.is_some());
    }

    #[test]
    fn test_set_profile_rejects_bad_enums_and_metrics() {
        let mut session = session();
        assert!(set_profile(&mut session, 170.0, 70.0, 30, "other", "moderate", "maintain", None)
            .is_err());
        assert!(set_profile(&mut session, 170.0, 70.0, 30, "male", "couch", "maintain", None)
            .is_err());
        assert!(set_profile(&mut session, 0.0, 70.0, 30, "male", "moderate", "maintain", None)
            .is_err());
        assert!(set_profile(&mut session, 170.0, 70.0, 30, "male", "moderate", "maintain", Some(-1.0))
            .is_err());
        // Nothing stored on failure
        assert!(session.profile.is_none());
    }
}
