//! Daily log aggregator
//!
//! Owns the ordered entry sequences for one calendar day. Totals are always
//! recomputed from the sequences on read, so they cannot drift from the
//! entries. Append fails atomically: a rejected entry leaves the log unchanged.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    HydrationEntry, HydrationEntryCreate, MealEntry, MealEntryCreate, Nutrition,
    WorkoutEntry, WorkoutEntryCreate,
};

/// Entry validation error types
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Result type for log operations
pub type LogResult<T> = Result<T, ValidationError>;

/// Running totals for a day, computed as a fold over the entry sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayTotals {
    pub calories_consumed: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub calories_burned: f64,
    pub hydration_ml: f64,
}

/// Append-only log of one day's meals, workouts, and hydration
#[derive(Debug, Clone, Serialize)]
pub struct DailyLog {
    date: NaiveDate,
    meals: Vec<MealEntry>,
    workouts: Vec<WorkoutEntry>,
    hydration: Vec<HydrationEntry>,
    next_id: u64,
}

impl DailyLog {
    /// Create an empty log for the given date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
            workouts: Vec::new(),
            hydration: Vec::new(),
            next_id: 1,
        }
    }

    /// The date this log covers
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn meals(&self) -> &[MealEntry] {
        &self.meals
    }

    pub fn workouts(&self) -> &[WorkoutEntry] {
        &self.workouts
    }

    pub fn hydration(&self) -> &[HydrationEntry] {
        &self.hydration
    }

    /// Append a meal entry. Fails without mutating the log if any nutrition
    /// field is negative or non-finite.
    pub fn add_meal(&mut self, data: MealEntryCreate) -> LogResult<MealEntry> {
        validate_number("calories", data.nutrition.calories)?;
        validate_number("protein_g", data.nutrition.protein_g)?;
        validate_number("carbs_g", data.nutrition.carbs_g)?;
        validate_number("fat_g", data.nutrition.fat_g)?;

        let entry = MealEntry {
            id: self.take_id(),
            description: data.description,
            meal_type: data.meal_type,
            nutrition: data.nutrition,
            timestamp: now_timestamp(),
        };
        self.meals.push(entry.clone());
        Ok(entry)
    }

    /// Append a workout entry
    pub fn add_workout(&mut self, data: WorkoutEntryCreate) -> LogResult<WorkoutEntry> {
        validate_number("calories_burned", data.calories_burned)?;

        let entry = WorkoutEntry {
            id: self.take_id(),
            description: data.description,
            calories_burned: data.calories_burned,
            timestamp: now_timestamp(),
        };
        self.workouts.push(entry.clone());
        Ok(entry)
    }

    /// Append a hydration entry
    pub fn add_hydration(&mut self, data: HydrationEntryCreate) -> LogResult<HydrationEntry> {
        validate_number("amount_ml", data.amount_ml)?;

        let entry = HydrationEntry {
            id: self.take_id(),
            amount_ml: data.amount_ml,
            timestamp: now_timestamp(),
        };
        self.hydration.push(entry.clone());
        Ok(entry)
    }

    /// Remove a meal entry by id. Returns true if an entry was removed.
    pub fn remove_meal(&mut self, id: u64) -> bool {
        let before = self.meals.len();
        self.meals.retain(|e| e.id != id);
        self.meals.len() < before
    }

    /// Remove a workout entry by id
    pub fn remove_workout(&mut self, id: u64) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|e| e.id != id);
        self.workouts.len() < before
    }

    /// Remove a hydration entry by id
    pub fn remove_hydration(&mut self, id: u64) -> bool {
        let before = self.hydration.len();
        self.hydration.retain(|e| e.id != id);
        self.hydration.len() < before
    }

    /// Compute totals as a fold over the current entry sequences
    pub fn totals(&self) -> DayTotals {
        let nutrition: Nutrition = self.meals.iter().map(|e| e.nutrition.clone()).sum();

        DayTotals {
            calories_consumed: nutrition.calories,
            protein_g: nutrition.protein_g,
            carbs_g: nutrition.carbs_g,
            fat_g: nutrition.fat_g,
            calories_burned: self.workouts.iter().map(|e| e.calories_burned).sum(),
            hydration_ml: self.hydration.iter().map(|e| e.amount_ml).sum(),
        }
    }

    /// Number of entries across all sequences
    pub fn entry_count(&self) -> usize {
        self.meals.len() + self.workouts.len() + self.hydration.len()
    }

    /// Clear all sequences for day rollover. Irreversible.
    pub fn reset(&mut self, date: NaiveDate) {
        self.date = date;
        self.meals.clear();
        self.workouts.clear();
        self.hydration.clear();
        self.next_id = 1;
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn validate_number(field: &'static str, value: f64) -> LogResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn meal(calories: f64) -> MealEntryCreate {
        MealEntryCreate {
            description: "test meal".to_string(),
            meal_type: MealType::Lunch,
            nutrition: Nutrition {
                calories,
                protein_g: calories / 20.0,
                carbs_g: calories / 10.0,
                fat_g: calories / 30.0,
            },
        }
    }

    #[test]
    fn test_totals_equal_sum_of_entries() {
        let mut log = DailyLog::new(test_date());
        log.add_meal(meal(500.0)).unwrap();
        log.add_meal(meal(300.0)).unwrap();
        log.add_meal(meal(120.0)).unwrap();

        let totals = log.totals();
        assert_eq!(totals.calories_consumed, 920.0);
        assert_eq!(totals.protein_g, 46.0);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let calories = [500.0, 300.0, 120.0, 75.5];

        let mut forward = DailyLog::new(test_date());
        for c in calories {
            forward.add_meal(meal(c)).unwrap();
        }

        let mut reverse = DailyLog::new(test_date());
        for c in calories.iter().rev() {
            reverse.add_meal(meal(*c)).unwrap();
        }

        assert_eq!(forward.totals(), reverse.totals());
    }

    #[test]
    fn test_totals_cover_all_entry_kinds() {
        let mut log = DailyLog::new(test_date());
        log.add_meal(meal(600.0)).unwrap();
        log.add_workout(WorkoutEntryCreate {
            description: "30 minutes of jogging".to_string(),
            calories_burned: 250.0,
        })
        .unwrap();
        log.add_hydration(HydrationEntryCreate { amount_ml: 500.0 }).unwrap();
        log.add_hydration(HydrationEntryCreate { amount_ml: 250.0 }).unwrap();

        let totals = log.totals();
        assert_eq!(totals.calories_consumed, 600.0);
        assert_eq!(totals.calories_burned, 250.0);
        assert_eq!(totals.hydration_ml, 750.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut log = DailyLog::new(test_date());
        log.add_meal(meal(500.0)).unwrap();
        log.add_hydration(HydrationEntryCreate { amount_ml: 500.0 }).unwrap();

        let next = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        log.reset(next);

        assert_eq!(log.date(), next);
        assert_eq!(log.entry_count(), 0);
        assert_eq!(log.totals(), DayTotals::default());
    }

    #[test]
    fn test_negative_values_are_rejected_without_mutation() {
        let mut log = DailyLog::new(test_date());
        log.add_meal(meal(500.0)).unwrap();

        let mut bad = meal(300.0);
        bad.nutrition.fat_g = -2.0;
        let err = log.add_meal(bad).unwrap_err();
        assert_eq!(err, ValidationError::Negative { field: "fat_g", value: -2.0 });

        let err = log
            .add_workout(WorkoutEntryCreate {
                description: "rowing".to_string(),
                calories_burned: -10.0,
            })
            .unwrap_err();
        assert!(matches!(err, ValidationError::Negative { field: "calories_burned", .. }));

        let err = log
            .add_hydration(HydrationEntryCreate { amount_ml: f64::NAN })
            .unwrap_err();
        assert_eq!(err, ValidationError::NotFinite { field: "amount_ml" });

        // Only the first valid meal is in the log
        assert_eq!(log.entry_count(), 1);
        assert_eq!(log.totals().calories_consumed, 500.0);
    }

    #[test]
    fn test_remove_by_id_keeps_totals_consistent() {
        let mut log = DailyLog::new(test_date());
        let first = log.add_meal(meal(500.0)).unwrap();
        let second = log.add_meal(meal(300.0)).unwrap();
        assert_ne!(first.id, second.id);

        assert!(log.remove_meal(first.id));
        assert!(!log.remove_meal(first.id));
        assert_eq!(log.totals().calories_consumed, 300.0);

        let workout = log
            .add_workout(WorkoutEntryCreate {
                description: "cycling".to_string(),
                calories_burned: 150.0,
            })
            .unwrap();
        assert!(log.remove_workout(workout.id));
        assert_eq!(log.totals().calories_burned, 0.0);
    }
}
