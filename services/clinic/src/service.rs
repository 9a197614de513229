//! Clinic actions as the front-end triggers them
//!
//! Every action names its subject explicitly and runs through the
//! [`ActionRegistry`], so repeated loads of the same record only ever
//! apply the newest response.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    actions::{ActionKind, ActionOutcome, ActionRegistry},
    alerts::{ClassifiedRecord, Discrepancy, VaccinationAlerts, reconcile},
    client::ClinicClient,
    error::{ClinicError, ClinicResult},
    models::{Animal, MedicalRecord, NewVaccination, VaccinationRecord},
    vaccination::Classifier,
};

/// Subject id used for clinic-wide actions
const CLINIC_WIDE: u64 = 0;

/// Where the vaccination overview comes from
#[derive(Debug, Clone)]
pub enum OverviewSource {
    /// Server-filtered overdue and due-soon lists
    Server,
    /// Re-derive from a full list already in hand
    ClientSide(Vec<VaccinationRecord>),
}

/// Facade over the REST client with superseding actions
#[derive(Debug, Clone)]
pub struct ClinicService {
    client: ClinicClient,
    registry: ActionRegistry,
    classifier: Classifier,
}

impl ClinicService {
    pub fn new(client: ClinicClient, classifier: Classifier) -> Self {
        Self {
            client,
            registry: ActionRegistry::new(),
            classifier,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub async fn load_animal(&self, animal_id: u64) -> ClinicResult<ActionOutcome<Animal>> {
        let client = self.client.clone();
        self.registry
            .run(ActionKind::LoadAnimal, animal_id, async move {
                client.get_animal(animal_id).await
            })
            .await
            .transpose()
    }

    pub async fn load_medical_record(
        &self,
        animal_id: u64,
    ) -> ClinicResult<ActionOutcome<Option<MedicalRecord>>> {
        let client = self.client.clone();
        self.registry
            .run(ActionKind::LoadMedicalRecord, animal_id, async move {
                client.medical_record(animal_id).await
            })
            .await
            .transpose()
    }

    pub async fn save_medical_record(
        &self,
        animal_id: u64,
        record: MedicalRecord,
    ) -> ClinicResult<ActionOutcome<MedicalRecord>> {
        let client = self.client.clone();
        self.registry
            .run(ActionKind::SaveMedicalRecord, animal_id, async move {
                client.save_medical_record(animal_id, &record).await
            })
            .await
            .transpose()
    }

    /// The animal's vaccinations, each classified as of `today`
    pub async fn load_vaccinations(
        &self,
        animal_id: u64,
        today: NaiveDate,
    ) -> ClinicResult<ActionOutcome<Vec<ClassifiedRecord>>> {
        let client = self.client.clone();
        let outcome = self
            .registry
            .run(ActionKind::LoadVaccinations, animal_id, async move {
                client.list_vaccinations(animal_id).await
            })
            .await
            .transpose()?;

        let classifier = self.classifier;
        Ok(match outcome {
            ActionOutcome::Completed(records) => ActionOutcome::Completed(
                records
                    .into_iter()
                    .map(|record| ClassifiedRecord {
                        classification: classifier.classify(&record, today),
                        record,
                    })
                    .collect(),
            ),
            ActionOutcome::Superseded => ActionOutcome::Superseded,
        })
    }

    /// Every animal's vaccinations, for deriving the overview locally
    pub async fn load_all_vaccinations(&self) -> ClinicResult<ActionOutcome<Vec<VaccinationRecord>>> {
        let client = self.client.clone();
        self.registry
            .run(ActionKind::LoadAllVaccinations, CLINIC_WIDE, async move {
                let mut records = Vec::new();
                for animal in client.list_animals().await? {
                    records.extend(client.list_vaccinations(animal.id).await?);
                }
                info!("Loaded {} vaccinations for local classification", records.len());
                Ok::<_, ClinicError>(records)
            })
            .await
            .transpose()
    }

    /// Validate and register a dose for `animal_id`
    pub async fn register_vaccination(
        &self,
        animal_id: u64,
        payload: NewVaccination,
        today: NaiveDate,
    ) -> ClinicResult<ActionOutcome<VaccinationRecord>> {
        if let Err(e) = payload.validate(today) {
            warn!("Vaccination form rejected: {}", e);
            return Err(e.into());
        }

        let client = self.client.clone();
        self.registry
            .run(ActionKind::RegisterVaccination, animal_id, async move {
                client.create_vaccination(animal_id, &payload).await
            })
            .await
            .transpose()
    }

    pub async fn mark_vaccination_complete(
        &self,
        vaccination_id: u64,
    ) -> ClinicResult<ActionOutcome<()>> {
        let client = self.client.clone();
        self.registry
            .run(ActionKind::MarkVaccinationComplete, vaccination_id, async move {
                client.mark_vaccination_complete(vaccination_id).await
            })
            .await
            .transpose()
    }

    pub async fn delete_vaccination(&self, vaccination_id: u64) -> ClinicResult<ActionOutcome<()>> {
        let client = self.client.clone();
        self.registry
            .run(ActionKind::DeleteVaccination, vaccination_id, async move {
                client.delete_vaccination(vaccination_id).await
            })
            .await
            .transpose()
    }

    /// Clinic-wide overdue/due-soon overview as of `today`
    pub async fn vaccination_overview(
        &self,
        today: NaiveDate,
        source: OverviewSource,
    ) -> ClinicResult<ActionOutcome<VaccinationAlerts>> {
        let alerts = match source {
            OverviewSource::ClientSide(records) => {
                ActionOutcome::Completed(VaccinationAlerts::partition(records, today, &self.classifier))
            }
            OverviewSource::Server => {
                let client = self.client.clone();
                let classifier = self.classifier;
                self.registry
                    .run(ActionKind::LoadOverview, CLINIC_WIDE, async move {
                        let (overdue, due_soon) = tokio::try_join!(
                            client.overdue_vaccinations(),
                            client.due_soon_vaccinations()
                        )?;
                        Ok::<_, ClinicError>(VaccinationAlerts::from_server_lists(
                            overdue,
                            due_soon,
                            today,
                            &classifier,
                        ))
                    })
                    .await
                    .transpose()?
            }
        };

        if let ActionOutcome::Completed(overview) = &alerts {
            if let Some(banner) = overview.banner() {
                info!("{}", banner.message());
            }
        }
        Ok(alerts)
    }

    /// Check the server's pre-filtered lists against local classification
    pub async fn reconcile_overview(&self, today: NaiveDate) -> ClinicResult<Vec<Discrepancy>> {
        let (overdue, due_soon) = tokio::try_join!(
            self.client.overdue_vaccinations(),
            self.client.due_soon_vaccinations()
        )?;

        let discrepancies = reconcile(&overdue, &due_soon, today, &self.classifier);
        for d in &discrepancies {
            warn!(
                "Vaccination {} listed as {:?} but classifies as {:?}",
                d.record_id, d.reported, d.derived
            );
        }
        Ok(discrepancies)
    }
}
