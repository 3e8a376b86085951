//! Goal delta calculations
//!
//! Remaining calories and macros against the day's targets, and hydration
//! progress. Negative remainders are valid (over target) and reported as-is.
//! Hydration progress is not capped at 1.0: values above 1.0 mean the goal
//! was exceeded.

use serde::Serialize;

use crate::models::Profile;
use crate::session::DayTotals;

use super::energy::{calorie_target, macro_targets, TargetResult};

/// Per-macro grams remaining against the day's targets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroRemaining {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Calories remaining: target - consumed + burned
pub fn remaining_calories(profile: &Profile, totals: &DayTotals) -> TargetResult<f64> {
    let target = calorie_target(profile)?;
    Ok(target - totals.calories_consumed + totals.calories_burned)
}

/// Macro grams remaining; may go negative when over target
pub fn macro_remaining(profile: &Profile, totals: &DayTotals) -> TargetResult<MacroRemaining> {
    let targets = macro_targets(profile)?;
    Ok(MacroRemaining {
        protein_g: targets.protein_g - totals.protein_g,
        carbs_g: targets.carbs_g - totals.carbs_g,
        fat_g: targets.fat_g - totals.fat_g,
    })
}

/// Hydration progress as a fraction of the profile's goal, uncapped
pub fn hydration_progress(profile: &Profile, totals: &DayTotals) -> f64 {
    if profile.hydration_goal_ml <= 0.0 {
        return 0.0;
    }
    totals.hydration_ml / profile.hydration_goal_ml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, Goal};
    use crate::targets::energy::IncompleteProfileError;

    fn reference_profile() -> Profile {
        Profile {
            height_cm: 170.0,
            weight_kg: 70.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::Maintain,
            hydration_goal_ml: 2000.0,
        }
    }

    fn totals(consumed: f64, burned: f64, hydration: f64) -> DayTotals {
        DayTotals {
            calories_consumed: consumed,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            calories_burned: burned,
            hydration_ml: hydration,
        }
    }

    #[test]
    fn test_remaining_calories_reference_example() {
        // Target for the reference profile is 2507.125; one 500 kcal meal and
        // one 200 kcal workout leave 2207.125.
        let remaining =
            remaining_calories(&reference_profile(), &totals(500.0, 200.0, 0.0)).unwrap();
        assert!((remaining - 2207.125).abs() < 1e-9);
    }

    #[test]
    fn test_remaining_calories_is_pure() {
        let profile = reference_profile();
        let t = totals(1200.0, 350.0, 0.0);
        assert_eq!(
            remaining_calories(&profile, &t).unwrap(),
            remaining_calories(&profile, &t).unwrap()
        );
    }

    #[test]
    fn test_macro_remaining_can_go_negative() {
        let profile = reference_profile();
        let t = DayTotals {
            calories_consumed: 3000.0,
            protein_g: 500.0,
            carbs_g: 10.0,
            fat_g: 10.0,
            calories_burned: 0.0,
            hydration_ml: 0.0,
        };
        let remaining = macro_remaining(&profile, &t).unwrap();
        assert!(remaining.protein_g < 0.0);
        assert!(remaining.carbs_g > 0.0);
    }

    #[test]
    fn test_hydration_progress_reference_examples() {
        let profile = reference_profile();
        // Two 500 ml entries against a 2000 ml goal
        assert_eq!(hydration_progress(&profile, &totals(0.0, 0.0, 1000.0)), 0.5);
        // Exceeding the goal is preserved, not clamped
        assert_eq!(hydration_progress(&profile, &totals(0.0, 0.0, 2500.0)), 1.25);
    }

    #[test]
    fn test_hydration_progress_zero_goal_is_zero() {
        let mut profile = reference_profile();
        profile.hydration_goal_ml = 0.0;
        assert_eq!(hydration_progress(&profile, &totals(0.0, 0.0, 1000.0)), 0.0);
    }

    #[test]
    fn test_delta_requires_complete_profile() {
        let mut profile = reference_profile();
        profile.weight_kg = 0.0;
        assert_eq!(
            remaining_calories(&profile, &totals(0.0, 0.0, 0.0)).unwrap_err(),
            IncompleteProfileError { field: "weight_kg" }
        );
        assert!(macro_remaining(&profile, &totals(0.0, 0.0, 0.0)).is_err());
    }
}
