//! Animal models

use serde::{Deserialize, Serialize};

/// Dog size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DogSize {
    Small,
    Medium,
    Large,
}

/// Cat coat length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoatLength {
    Short,
    Medium,
    Long,
}

/// Kind of animal, fixed when the record is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnimalKind {
    Dog {
        size: DogSize,
    },
    Cat {
        coat: CoatLength,
        temperament: String,
    },
    Other,
}

impl AnimalKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnimalKind::Dog { .. } => "dog",
            AnimalKind::Cat { .. } => "cat",
            AnimalKind::Other => "animal",
        }
    }
}

/// Animal entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: u64,
    pub name: String,
    pub species: String,
    /// Age in years; fractions are months
    pub age: f64,
    pub owner_name: String,
    pub phone: String,
    #[serde(default)]
    pub breed: Option<String>,
    pub kind: AnimalKind,
}

impl Animal {
    /// Age in "human years": 15 for the first year, 9 more for the second,
    /// then 4 per year
    pub fn human_age(&self) -> u32 {
        human_age(self.age)
    }

    /// Care advice that depends on the animal's kind
    pub fn care_tip(&self) -> Option<&'static str> {
        match &self.kind {
            AnimalKind::Dog { size } => Some(match size {
                DogSize::Small => "30 minutes of walking per day",
                DogSize::Medium => "1 hour of exercise per day",
                DogSize::Large => "1h30 to 2 hours of exercise per day",
            }),
            AnimalKind::Cat { coat, .. } => Some(match coat {
                CoatLength::Short => "Weekly brushing is enough",
                CoatLength::Medium => "Brush 2 to 3 times a week",
                CoatLength::Long => "Daily brushing to prevent knots",
            }),
            AnimalKind::Other => None,
        }
    }
}

fn human_age(age: f64) -> u32 {
    if age <= 0.0 {
        return 0;
    }

    let years = age.floor();
    let human = if years < 1.0 {
        15.0 * age
    } else if years < 2.0 {
        15.0 + (9.0 * (age - 1.0)).floor()
    } else {
        24.0 + (years - 2.0) * 4.0 + (4.0 * (age - years)).floor()
    };

    human as u32
}

/// New animal creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub age: f64,
    pub owner_name: String,
    pub phone: String,
    #[serde(default)]
    pub breed: Option<String>,
    pub kind: AnimalKind,
}

/// Animal counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalStats {
    pub total: u64,
    pub dogs: u64,
    pub cats: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(age: f64, kind: AnimalKind) -> Animal {
        Animal {
            id: 1,
            name: "Rex".to_string(),
            species: "Canine".to_string(),
            age,
            owner_name: "Ana".to_string(),
            phone: "555-0100".to_string(),
            breed: None,
            kind,
        }
    }

    #[test]
    fn test_human_age_table() {
        let cases = [
            (-1.0, 0),
            (0.0, 0),
            (0.5, 7),
            (1.0, 15),
            (1.5, 19),
            (2.0, 24),
            (2.5, 26),
            (5.0, 36),
        ];
        for (age, expected) in cases {
            assert_eq!(animal(age, AnimalKind::Other).human_age(), expected, "age {age}");
        }
    }

    #[test]
    fn test_care_tip_follows_kind() {
        let dog = animal(3.0, AnimalKind::Dog { size: DogSize::Large });
        assert_eq!(dog.care_tip(), Some("1h30 to 2 hours of exercise per day"));

        let cat = animal(
            3.0,
            AnimalKind::Cat {
                coat: CoatLength::Long,
                temperament: "calm".to_string(),
            },
        );
        assert_eq!(cat.care_tip(), Some("Daily brushing to prevent knots"));
        assert_eq!(animal(3.0, AnimalKind::Other).care_tip(), None);
    }

    #[test]
    fn test_kind_is_explicit_on_the_wire() {
        let json = r#"{
            "id": 9, "name": "Mia", "species": "Feline", "age": 2,
            "ownerName": "Bruno", "phone": "555-0199",
            "kind": {"type": "cat", "coat": "short", "temperament": "shy"}
        }"#;
        let parsed: Animal = serde_json::from_str(json).expect("animal json");
        assert_eq!(parsed.kind.label(), "cat");
        assert_eq!(parsed.breed, None);

        let other = serde_json::to_value(animal(1.0, AnimalKind::Other)).expect("serialize");
        assert_eq!(other["kind"], serde_json::json!({"type": "other"}));
    }
}
