//! Vaccination models

use chrono::NaiveDate;
use common::error::{ValidationError, require};
use serde::{Deserialize, Serialize};

/// One administered dose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    pub id: u64,
    /// Owning animal; list payloads already scoped to an animal may omit it
    #[serde(default)]
    pub animal_id: Option<u64>,
    pub name: String,
    pub application_date: NaiveDate,
    #[serde(default)]
    pub next_dose_date: Option<NaiveDate>,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub veterinarian: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "completionFlag", default)]
    pub completed: bool,
}

impl VaccinationRecord {
    /// Mark the series complete. There is no way back.
    pub fn mark_complete(&mut self) {
        self.completed = true;
    }
}

/// Payload for registering a dose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVaccination {
    pub name: String,
    pub application_date: NaiveDate,
    #[serde(default)]
    pub next_dose_date: Option<NaiveDate>,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub veterinarian: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "completionFlag", default)]
    pub completed: bool,
}

impl NewVaccination {
    /// Check the form before it is sent
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        require("name", &self.name)?;

        if self.application_date > today {
            return Err(ValidationError::Invalid {
                field: "applicationDate",
                reason: "cannot be in the future".to_string(),
            });
        }

        if let Some(next) = self.next_dose_date {
            if next < self.application_date {
                return Err(ValidationError::Invalid {
                    field: "nextDoseDate",
                    reason: "cannot precede the application date".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn payload() -> NewVaccination {
        NewVaccination {
            name: "Rabies".to_string(),
            application_date: date(2024, 3, 1),
            next_dose_date: Some(date(2025, 3, 1)),
            lot: Some("L-88".to_string()),
            veterinarian: None,
            notes: None,
            completed: false,
        }
    }

    #[test]
    fn test_validate_payload() {
        let today = date(2024, 3, 10);
        assert!(payload().validate(today).is_ok());

        let mut blank = payload();
        blank.name = "  ".to_string();
        assert_eq!(blank.validate(today), Err(ValidationError::Required("name")));

        let mut future = payload();
        future.application_date = date(2024, 3, 11);
        assert_eq!(future.validate(today).unwrap_err().field(), "applicationDate");

        let mut backwards = payload();
        backwards.next_dose_date = Some(date(2024, 2, 1));
        assert_eq!(backwards.validate(today).unwrap_err().field(), "nextDoseDate");
    }

    #[test]
    fn test_record_wire_format() {
        let json = r#"{
            "id": 3, "name": "V10", "applicationDate": "2024-01-15",
            "nextDoseDate": null, "lot": "A1", "veterinarian": "Dr. Lima",
            "notes": null, "completionFlag": false
        }"#;
        let mut record: VaccinationRecord = serde_json::from_str(json).expect("record json");
        assert_eq!(record.application_date, date(2024, 1, 15));
        assert_eq!(record.next_dose_date, None);
        assert_eq!(record.animal_id, None);

        record.mark_complete();
        record.mark_complete();
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["completionFlag"], true);
        assert_eq!(value["applicationDate"], "2024-01-15");
    }
}
