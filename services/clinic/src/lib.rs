//! Clinic-side logic for the SmartVet front-end
//!
//! Domain models, vaccination status classification and alerts, the REST
//! client for the clinic backend and the cancellable action layer the
//! renderer drives.

pub mod actions;
pub mod alerts;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod vaccination;

pub use actions::{ActionKind, ActionOutcome, ActionRegistry};
pub use alerts::{AlertBanner, ClassifiedRecord, Discrepancy, VaccinationAlerts};
pub use client::{ApiConfig, ClinicClient};
pub use config::ClinicConfig;
pub use error::{ClinicError, ClinicResult};
pub use service::{ClinicService, OverviewSource};
pub use vaccination::{Classification, Classifier, VaccinationStatus, classify};
