//! Logged entry models
//!
//! Meal, workout, and hydration entries. Entries are immutable once added to
//! the daily log; ids are assigned by the log at append time.

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    BreakfastSnack,
    Lunch,
    EveningSnack,
    Dinner,
    Dessert,
    Unspecified,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::BreakfastSnack => "breakfast_snack",
            MealType::Lunch => "lunch",
            MealType::EveningSnack => "evening_snack",
            MealType::Dinner => "dinner",
            MealType::Dessert => "dessert",
            MealType::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "breakfast" => MealType::Breakfast,
            "breakfast_snack" | "morning_snack" => MealType::BreakfastSnack,
            "lunch" => MealType::Lunch,
            "evening_snack" | "afternoon_snack" | "snack" => MealType::EveningSnack,
            "dinner" => MealType::Dinner,
            "dessert" => MealType::Dessert,
            _ => MealType::Unspecified,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::BreakfastSnack => "Breakfast Snack",
            MealType::Lunch => "Lunch",
            MealType::EveningSnack => "Evening Snack",
            MealType::Dinner => "Dinner",
            MealType::Dessert => "Dessert",
            MealType::Unspecified => "Unspecified",
        }
    }
}

/// A logged meal with its estimated nutrition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: u64,
    pub description: String,
    pub meal_type: MealType,
    pub nutrition: Nutrition,
    pub timestamp: String,
}

/// Data for appending a meal entry
#[derive(Debug, Clone)]
pub struct MealEntryCreate {
    pub description: String,
    pub meal_type: MealType,
    pub nutrition: Nutrition,
}

/// A logged workout with its estimated energy expenditure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: u64,
    pub description: String,
    pub calories_burned: f64,
    pub timestamp: String,
}

/// Data for appending a workout entry
#[derive(Debug, Clone)]
pub struct WorkoutEntryCreate {
    pub description: String,
    pub calories_burned: f64,
}

/// A logged water intake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationEntry {
    pub id: u64,
    pub amount_ml: f64,
    pub timestamp: String,
}

/// Data for appending a hydration entry
#[derive(Debug, Clone)]
pub struct HydrationEntryCreate {
    pub amount_ml: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_round_trips() {
        for mt in [
            MealType::Breakfast,
            MealType::BreakfastSnack,
            MealType::Lunch,
            MealType::EveningSnack,
            MealType::Dinner,
            MealType::Dessert,
        ] {
            assert_eq!(MealType::from_str(mt.as_str()), mt);
        }
    }

    #[test]
    fn test_meal_type_falls_back_to_unspecified() {
        assert_eq!(MealType::from_str("brunch"), MealType::Unspecified);
        assert_eq!(MealType::from_str(""), MealType::Unspecified);
    }

    #[test]
    fn test_meal_type_accepts_display_spelling() {
        assert_eq!(MealType::from_str("Breakfast Snack"), MealType::BreakfastSnack);
        assert_eq!(MealType::from_str("Evening Snack"), MealType::EveningSnack);
    }
}
