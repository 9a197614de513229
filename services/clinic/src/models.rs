//! Clinic models for request and response payloads

pub mod animal;
pub mod medical_record;
pub mod vaccination;

pub use animal::{Animal, AnimalKind, AnimalStats, CoatLength, DogSize, NewAnimal};
pub use medical_record::MedicalRecord;
pub use vaccination::{NewVaccination, VaccinationRecord};
