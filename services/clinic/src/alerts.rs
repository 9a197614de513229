//! Clinic-wide vaccination alerts

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::VaccinationRecord;
use crate::vaccination::{Classification, Classifier, VaccinationStatus};

/// A record together with its status as of the overview date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRecord {
    pub record: VaccinationRecord,
    pub classification: Classification,
}

/// Banner shown when anything needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertBanner {
    pub overdue: usize,
    pub due_soon: usize,
}

impl AlertBanner {
    pub fn message(&self) -> String {
        format!(
            "{} vaccination(s) overdue and {} vaccination(s) due soon.",
            self.overdue, self.due_soon
        )
    }
}

/// Records split by urgency. Completed records are non-alerting and sit
/// in `current`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VaccinationAlerts {
    pub overdue: Vec<ClassifiedRecord>,
    pub due_soon: Vec<ClassifiedRecord>,
    pub current: Vec<ClassifiedRecord>,
}

impl VaccinationAlerts {
    /// Re-derive every status client-side
    pub fn partition<I>(records: I, today: NaiveDate, classifier: &Classifier) -> Self
    where
        I: IntoIterator<Item = VaccinationRecord>,
    {
        let mut alerts = Self::default();
        for record in records {
            let classification = classifier.classify(&record, today);
            let entry = ClassifiedRecord {
                record,
                classification,
            };
            match entry.classification.status {
                VaccinationStatus::Overdue => alerts.overdue.push(entry),
                VaccinationStatus::DueSoon => alerts.due_soon.push(entry),
                VaccinationStatus::Complete | VaccinationStatus::Current => {
                    alerts.current.push(entry)
                }
            }
        }
        alerts
    }

    /// Trust the server's pre-filtered lists; messages are still computed
    /// locally
    pub fn from_server_lists(
        overdue: Vec<VaccinationRecord>,
        due_soon: Vec<VaccinationRecord>,
        today: NaiveDate,
        classifier: &Classifier,
    ) -> Self {
        let classify_all = |records: Vec<VaccinationRecord>| -> Vec<ClassifiedRecord> {
            records
                .into_iter()
                .map(|record| ClassifiedRecord {
                    classification: classifier.classify(&record, today),
                    record,
                })
                .collect()
        };

        Self {
            overdue: classify_all(overdue),
            due_soon: classify_all(due_soon),
            current: Vec::new(),
        }
    }

    /// `Some` when at least one record is overdue or due soon
    pub fn banner(&self) -> Option<AlertBanner> {
        if self.overdue.is_empty() && self.due_soon.is_empty() {
            return None;
        }
        Some(AlertBanner {
            overdue: self.overdue.len(),
            due_soon: self.due_soon.len(),
        })
    }

    pub fn is_all_clear(&self) -> bool {
        self.banner().is_none()
    }
}

/// A server-listed record whose local status disagrees with its list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub record_id: u64,
    pub reported: VaccinationStatus,
    pub derived: VaccinationStatus,
}

/// Compare server-filtered lists against local classification
pub fn reconcile(
    server_overdue: &[VaccinationRecord],
    server_due_soon: &[VaccinationRecord],
    today: NaiveDate,
    classifier: &Classifier,
) -> Vec<Discrepancy> {
    let reported = server_overdue
        .iter()
        .map(|record| (record, VaccinationStatus::Overdue))
        .chain(
            server_due_soon
                .iter()
                .map(|record| (record, VaccinationStatus::DueSoon)),
        );

    reported
        .filter_map(|(record, reported)| {
            let derived = classifier.classify(record, today).status;
            (derived != reported).then_some(Discrepancy {
                record_id: record.id,
                reported,
                derived,
            })
        })
        .collect()
}
