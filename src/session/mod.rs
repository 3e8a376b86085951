//! Session state
//!
//! One `Session` per served process: the user's profile plus the current
//! day's log. Sessions never share state and nothing here is persisted.

mod daily_log;

pub use daily_log::{DailyLog, DayTotals, LogResult, ValidationError};

use chrono::NaiveDate;

use crate::models::Profile;

/// Per-session mutable state: profile and current day's log
#[derive(Debug)]
pub struct Session {
    pub profile: Option<Profile>,
    pub log: DailyLog,
}

impl Session {
    /// Create a fresh session with an empty log for the given date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            profile: None,
            log: DailyLog::new(date),
        }
    }

    /// Reset the log if the calendar day has changed since it was created.
    /// Returns true if a rollover happened.
    pub fn roll_over_if_needed(&mut self, today: NaiveDate) -> bool {
        if self.log.date() == today {
            return false;
        }
        tracing::info!(
            old_date = %self.log.date(),
            new_date = %today,
            "Day rollover, resetting daily log"
        );
        self.log.reset(today);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HydrationEntryCreate;

    #[test]
    fn test_rollover_resets_log_once_per_day() {
        let day1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        let mut session = Session::new(day1);
        session.log.add_hydration(HydrationEntryCreate { amount_ml: 500.0 }).unwrap();

        assert!(!session.roll_over_if_needed(day1));
        assert_eq!(session.log.entry_count(), 1);

        assert!(session.roll_over_if_needed(day2));
        assert_eq!(session.log.date(), day2);
        assert_eq!(session.log.entry_count(), 0);
    }
}
