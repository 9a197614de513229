//! Medical record (chart) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clinical chart kept for one animal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalRecord {
    pub id: Option<u64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub conditions: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl MedicalRecord {
    /// Body mass index from weight and height, when both are known
    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight_kg?;
        let height = self.height_cm?;
        if height == 0.0 {
            return None;
        }
        let meters = height / 100.0;
        Some(weight / (meters * meters))
    }

    /// True when any clinical field carries data
    pub fn has_information(&self) -> bool {
        self.weight_kg.is_some()
            || self.height_cm.is_some()
            || filled(&self.allergies)
            || filled(&self.medications)
            || filled(&self.conditions)
    }

    /// One-line summary for list views
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(weight) = self.weight_kg {
            parts.push(format!("Weight: {weight}kg"));
        }
        if let Some(height) = self.height_cm {
            parts.push(format!("Height: {height}cm"));
        }
        if filled(&self.allergies) {
            parts.push("Has allergies".to_string());
        }
        if filled(&self.medications) {
            parts.push("Continuous medication".to_string());
        }

        if parts.is_empty() {
            "No information".to_string()
        } else {
            parts.join(" | ")
        }
    }
}
