//! Dosage reminder entity model.

use chrono::{DateTime, Datelike, Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recurring dosage reminder for one medication.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    /// Unique reminder identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// The medication to take.
    pub medication_id: Uuid,
    /// Times of day the dose is due.
    pub times: Vec<NaiveTime>,
    /// Weekdays the reminder applies to, 0 = Sunday .. 6 = Saturday.
    /// Empty or absent means every day.
    pub weekdays: Option<Vec<i32>>,
    /// Units per dose.
    pub dose_quantity: Option<f64>,
    /// Free-form instructions.
    pub instructions: Option<String>,
    /// Whether the reminder is active.
    pub active: bool,
    /// When the reminder was created.
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Check whether the reminder applies on the given Sunday-based
    /// weekday index (0 = Sunday .. 6 = Saturday).
    pub fn is_due_on(&self, weekday: u32) -> bool {
        match &self.weekdays {
            None => true,
            Some(days) if days.is_empty() => true,
            Some(days) => days.contains(&(weekday as i32)),
        }
    }

    /// Check whether the reminder applies today (server-local clock).
    pub fn is_due_today(&self) -> bool {
        self.is_due_on(Local::now().weekday().num_days_from_sunday())
    }
}

/// Data required to create a new reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReminder {
    /// The owning user.
    pub user_id: Uuid,
    /// The medication to take.
    pub medication_id: Uuid,
    /// Times of day.
    pub times: Vec<NaiveTime>,
    /// Applicable weekdays.
    pub weekdays: Option<Vec<i32>>,
    /// Units per dose.
    pub dose_quantity: Option<f64>,
    /// Instructions.
    pub instructions: Option<String>,
    /// Whether the reminder starts active.
    pub active: bool,
}

/// Data for updating an existing reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReminder {
    /// The reminder ID to update.
    pub id: Uuid,
    /// New medication reference.
    pub medication_id: Uuid,
    /// New times of day.
    pub times: Vec<NaiveTime>,
    /// New applicable weekdays.
    pub weekdays: Option<Vec<i32>>,
    /// New units per dose.
    pub dose_quantity: Option<f64>,
    /// New instructions.
    pub instructions: Option<String>,
    /// New active flag.
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(weekdays: Option<Vec<i32>>) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            medication_id: Uuid::new_v4(),
            times: vec![NaiveTime::from_hms_opt(8, 0, 0).unwrap()],
            weekdays,
            dose_quantity: Some(1.0),
            instructions: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_weekdays_means_every_day() {
        let r = reminder(None);
        for day in 0..7 {
            assert!(r.is_due_on(day));
        }
        assert!(reminder(Some(Vec::new())).is_due_on(3));
    }

    #[test]
    fn test_due_only_on_listed_days() {
        // Monday (1) and Friday (5).
        let r = reminder(Some(vec![1, 5]));
        assert!(r.is_due_on(1));
        assert!(r.is_due_on(5));
        assert!(!r.is_due_on(0));
        assert!(!r.is_due_on(6));
    }
}
