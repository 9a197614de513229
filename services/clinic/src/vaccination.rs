//! Vaccination status classification
//!
//! Status is a pure function of the record and the calendar date it is
//! evaluated on. Callers classify at render time and never store the
//! result, because "today" moves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::VaccinationRecord;

/// Default alert horizon, inclusive
pub const DUE_SOON_HORIZON_DAYS: i64 = 30;

/// Lifecycle status of a vaccination, in evaluation priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VaccinationStatus {
    Complete,
    Overdue,
    DueSoon,
    Current,
}

impl VaccinationStatus {
    /// Badge style token used by the renderer
    pub fn badge(self) -> &'static str {
        match self {
            VaccinationStatus::Complete => "complete",
            VaccinationStatus::Overdue => "overdue",
            VaccinationStatus::DueSoon => "due-soon",
            VaccinationStatus::Current => "current",
        }
    }

    /// Whether the status counts towards the clinic-wide banner
    pub fn is_alert(self) -> bool {
        matches!(self, VaccinationStatus::Overdue | VaccinationStatus::DueSoon)
    }
}

/// Status plus the text shown under the badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub status: VaccinationStatus,
    pub message: String,
    /// Days overdue for `Overdue`, days remaining for `DueSoon` and for a
    /// scheduled `Current`
    pub days: Option<i64>,
}

/// Vaccination classifier configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VaccinationConfig {
    pub due_soon_days: i64,
}

impl Default for VaccinationConfig {
    fn default() -> Self {
        Self {
            due_soon_days: DUE_SOON_HORIZON_DAYS,
        }
    }
}

/// Classifier with a configurable due-soon horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    horizon_days: i64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            horizon_days: DUE_SOON_HORIZON_DAYS,
        }
    }
}

impl From<&VaccinationConfig> for Classifier {
    fn from(config: &VaccinationConfig) -> Self {
        Self::new(config.due_soon_days)
    }
}

fn day_count(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

impl Classifier {
    /// Negative horizons are clamped to zero
    pub fn new(horizon_days: i64) -> Self {
        Self {
            horizon_days: horizon_days.max(0),
        }
    }

    pub fn horizon_days(&self) -> i64 {
        self.horizon_days
    }

    /// Classify one record as of `today`; first matching rule wins
    pub fn classify(&self, record: &VaccinationRecord, today: NaiveDate) -> Classification {
        if record.completed {
            return Classification {
                status: VaccinationStatus::Complete,
                message: "vaccination complete.".to_string(),
                days: None,
            };
        }

        let Some(next_dose) = record.next_dose_date else {
            return Classification {
                status: VaccinationStatus::Current,
                message: "vaccination up to date.".to_string(),
                days: None,
            };
        };

        let remaining = (next_dose - today).num_days();

        if remaining < 0 {
            let overdue = -remaining;
            Classification {
                status: VaccinationStatus::Overdue,
                message: format!("vaccination overdue by {}.", day_count(overdue)),
                days: Some(overdue),
            }
        } else if remaining <= self.horizon_days {
            Classification {
                status: VaccinationStatus::DueSoon,
                message: format!("next dose due in {}.", day_count(remaining)),
                days: Some(remaining),
            }
        } else {
            Classification {
                status: VaccinationStatus::Current,
                message: format!("next dose in {}.", day_count(remaining)),
                days: Some(remaining),
            }
        }
    }
}

/// Classify with the default 30-day horizon
pub fn classify(record: &VaccinationRecord, today: NaiveDate) -> Classification {
    Classifier::default().classify(record, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    fn record(next_dose: Option<NaiveDate>, completed: bool) -> VaccinationRecord {
        VaccinationRecord {
            id: 1,
            animal_id: Some(10),
            name: "Rabies".to_string(),
            application_date: NaiveDate::from_ymd_opt(2023, 6, 15).expect("valid date"),
            next_dose_date: next_dose,
            lot: None,
            veterinarian: None,
            notes: None,
            completed,
        }
    }

    fn in_days(n: i64) -> Option<NaiveDate> {
        Some(today() + Duration::days(n))
    }

    #[test]
    fn test_completed_wins_over_any_date() {
        for next in [None, in_days(-400), in_days(-1), in_days(0), in_days(10), in_days(90)] {
            let result = classify(&record(next, true), today());
            assert_eq!(result.status, VaccinationStatus::Complete, "{next:?}");
            assert_eq!(result.message, "vaccination complete.");
            assert_eq!(result.days, None);
        }
    }

    #[test]
    fn test_one_day_late_is_overdue() {
        let result = classify(&record(in_days(-1), false), today());
        assert_eq!(result.status, VaccinationStatus::Overdue);
        assert_eq!(result.days, Some(1));
        assert_eq!(result.message, "vaccination overdue by 1 day.");
    }

    #[test]
    fn test_due_today_is_due_soon_not_overdue() {
        let result = classify(&record(in_days(0), false), today());
        assert_eq!(result.status, VaccinationStatus::DueSoon);
        assert_eq!(result.days, Some(0));
        assert!(result.message.contains("0 days"));
    }

    #[test]
    fn test_horizon_boundary() {
        let at_horizon = classify(&record(in_days(30), false), today());
        assert_eq!(at_horizon.status, VaccinationStatus::DueSoon);
        assert_eq!(at_horizon.days, Some(30));

        let past_horizon = classify(&record(in_days(31), false), today());
        assert_eq!(past_horizon.status, VaccinationStatus::Current);
        assert_eq!(past_horizon.days, Some(31));
    }

    #[test]
    fn test_unscheduled_open_record_is_current() {
        let result = classify(&record(None, false), today());
        assert_eq!(result.status, VaccinationStatus::Current);
        assert_eq!(result.days, None);
        assert!(!result.status.is_alert());
    }

    #[test]
    fn test_status_follows_the_calendar() {
        let rec = record(in_days(5), false);
        assert_eq!(classify(&rec, today()).status, VaccinationStatus::DueSoon);
        assert_eq!(
            classify(&rec, today() + Duration::days(6)).status,
            VaccinationStatus::Overdue
        );
        assert_eq!(
            classify(&rec, today() - Duration::days(60)).status,
            VaccinationStatus::Current
        );
    }

    #[test]
    fn test_custom_horizon() {
        let classifier = Classifier::new(7);
        assert_eq!(
            classifier.classify(&record(in_days(7), false), today()).status,
            VaccinationStatus::DueSoon
        );
        assert_eq!(
            classifier.classify(&record(in_days(8), false), today()).status,
            VaccinationStatus::Current
        );
        assert_eq!(Classifier::new(-3).horizon_days(), 0);
        assert_eq!(
            Classifier::from(&VaccinationConfig { due_soon_days: 14 }).horizon_days(),
            14
        );
    }

    #[test]
    fn test_badges() {
        assert_eq!(VaccinationStatus::DueSoon.badge(), "due-soon");
        assert_eq!(VaccinationStatus::Overdue.badge(), "overdue");
        assert!(VaccinationStatus::Overdue.is_alert());
        assert!(!VaccinationStatus::Complete.is_alert());
    }
}
