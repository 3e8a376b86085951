//! Energy target calculations
//!
//! Calorie targets use the Mifflin-St Jeor basal metabolic rate:
//!
//!   male:   BMR = 10 * weight_kg + 6.25 * height_cm - 5 * age + 5
//!   female: BMR = 10 * weight_kg + 6.25 * height_cm - 5 * age - 161
//!
//! TDEE = BMR * activity multiplier (1.2 / 1.375 / 1.55 / 1.725), and the
//! daily calorie target adds the goal offset (-500 lose, +500 gain).
//!
//! Macro targets split the calorie target 30% protein / 40% carbs / 30% fat
//! at 4 kcal/g for protein and carbs, 9 kcal/g for fat.

use serde::Serialize;
use thiserror::Error;

use crate::models::{Gender, Profile};

/// Goal math attempted without a usable profile
#[derive(Debug, Error, PartialEq)]
#[error("incomplete profile: {field} must be a positive value")]
pub struct IncompleteProfileError {
    pub field: &'static str,
}

/// Result type for target calculations
pub type TargetResult<T> = Result<T, IncompleteProfileError>;

/// Daily macro gram targets derived from the calorie target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

const PROTEIN_CALORIE_SHARE: f64 = 0.30;
const CARBS_CALORIE_SHARE: f64 = 0.40;
const FAT_CALORIE_SHARE: f64 = 0.30;

const CALORIES_PER_GRAM_PROTEIN: f64 = 4.0;
const CALORIES_PER_GRAM_CARBS: f64 = 4.0;
const CALORIES_PER_GRAM_FAT: f64 = 9.0;

/// Check that the profile carries usable body metrics
pub fn check_complete(profile: &Profile) -> TargetResult<()> {
    if !profile.height_cm.is_finite() || profile.height_cm <= 0.0 {
        return Err(IncompleteProfileError { field: "height_cm" });
    }
    if !profile.weight_kg.is_finite() || profile.weight_kg <= 0.0 {
        return Err(IncompleteProfileError { field: "weight_kg" });
    }
    if profile.age == 0 {
        return Err(IncompleteProfileError { field: "age" });
    }
    Ok(())
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day
pub fn bmr(profile: &Profile) -> TargetResult<f64> {
    check_complete(profile)?;

    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    Ok(match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    })
}

/// Total daily energy expenditure: BMR scaled by the activity multiplier
pub fn tdee(profile: &Profile) -> TargetResult<f64> {
    Ok(bmr(profile)? * profile.activity_level.multiplier())
}

/// Daily calorie target: TDEE adjusted by the goal offset
pub fn calorie_target(profile: &Profile) -> TargetResult<f64> {
    Ok(tdee(profile)? + profile.goal.calorie_offset())
}

/// Daily macro gram targets from the calorie target
pub fn macro_targets(profile: &Profile) -> TargetResult<MacroTargets> {
    let target = calorie_target(profile)?;
    Ok(MacroTargets {
        protein_g: target * PROTEIN_CALORIE_SHARE / CALORIES_PER_GRAM_PROTEIN,
        carbs_g: target * CARBS_CALORIE_SHARE / CALORIES_PER_GRAM_CARBS,
        fat_g: target * FAT_CALORIE_SHARE / CALORIES_PER_GRAM_FAT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Goal, DEFAULT_HYDRATION_GOAL_ML};

    fn reference_profile() -> Profile {
        Profile {
            height_cm: 170.0,
            weight_kg: 70.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::Maintain,
            hydration_goal_ml: DEFAULT_HYDRATION_GOAL_ML,
        }
    }

    #[test]
    fn test_bmr_male_reference() {
        // 10*70 + 6.25*170 - 5*30 + 5 = 1617.5
        let value = bmr(&reference_profile()).unwrap();
        assert!((value - 1617.5).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female_reference() {
        let mut profile = reference_profile();
        profile.gender = Gender::Female;
        // 10*70 + 6.25*170 - 5*30 - 161 = 1451.5
        let value = bmr(&profile).unwrap();
        assert!((value - 1451.5).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_applies_activity_multiplier() {
        // 1617.5 * 1.55 = 2507.125
        let value = tdee(&reference_profile()).unwrap();
        assert!((value - 2507.125).abs() < 1e-9);

        let mut sedentary = reference_profile();
        sedentary.activity_level = ActivityLevel::Sedentary;
        let value = tdee(&sedentary).unwrap();
        assert!((value - 1617.5 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_target_applies_goal_offset() {
        let maintain = calorie_target(&reference_profile()).unwrap();
        assert!((maintain - 2507.125).abs() < 1e-9);

        let mut lose = reference_profile();
        lose.goal = Goal::Lose;
        assert!((calorie_target(&lose).unwrap() - 2007.125).abs() < 1e-9);

        let mut gain = reference_profile();
        gain.goal = Goal::Gain;
        assert!((calorie_target(&gain).unwrap() - 3007.125).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_target_is_pure() {
        let profile = reference_profile();
        assert_eq!(
            calorie_target(&profile).unwrap(),
            calorie_target(&profile).unwrap()
        );
    }

    #[test]
    fn test_macro_targets_split() {
        let macros = macro_targets(&reference_profile()).unwrap();
        // 2507.125 kcal: 30% / 4 = 188.03, 40% / 4 = 250.71, 30% / 9 = 83.57
        assert!((macros.protein_g - 2507.125 * 0.30 / 4.0).abs() < 1e-9);
        assert!((macros.carbs_g - 2507.125 * 0.40 / 4.0).abs() < 1e-9);
        assert!((macros.fat_g - 2507.125 * 0.30 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_incomplete_profile_is_rejected() {
        let mut profile = reference_profile();
        profile.height_cm = 0.0;
        assert_eq!(
            bmr(&profile).unwrap_err(),
            IncompleteProfileError { field: "height_cm" }
        );

        let mut profile = reference_profile();
        profile.weight_kg = f64::NAN;
        assert_eq!(
            calorie_target(&profile).unwrap_err(),
            IncompleteProfileError { field: "weight_kg" }
        );

        let mut profile = reference_profile();
        profile.age = 0;
        assert_eq!(
            macro_targets(&profile).unwrap_err(),
            IncompleteProfileError { field: "age" }
        );
    }
}
