//! REST client for the clinic backend
//!
//! Every call issues exactly one request. There is no retry; failures
//! surface to the caller, which shows them and lets the user try again.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::{
    error::{ClinicError, ClinicResult},
    models::{
        Animal, AnimalKind, AnimalStats, MedicalRecord, NewAnimal, NewVaccination,
        VaccinationRecord,
    },
};

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Body of an error response
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for animals, medical records and vaccinations
#[derive(Debug, Clone)]
pub struct ClinicClient {
    http: Client,
    base_url: String,
}

impl ClinicClient {
    /// Create a client for `config.base_url`
    pub fn new(config: &ApiConfig) -> ClinicResult<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ClinicError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!("Clinic client targeting {}", config.base_url);
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(response: Response) -> ClinicResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .ok()
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        error!("Backend returned {}: {}", status, message);
        Err(ClinicError::Status { status, message })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClinicResult<T> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn execute(&self, request: RequestBuilder) -> ClinicResult<()> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    // -- Animals --

    pub async fn list_animals(&self) -> ClinicResult<Vec<Animal>> {
        debug!("GET animals");
        self.fetch(self.http.get(self.url("animals"))).await
    }

    pub async fn get_animal(&self, id: u64) -> ClinicResult<Animal> {
        debug!("GET animal {}", id);
        self.fetch(self.http.get(self.url(&format!("animals/{id}"))))
            .await
    }

    pub async fn search_animals(&self, name: &str) -> ClinicResult<Vec<Animal>> {
        debug!("Searching animals by name {}", name);
        self.fetch(
            self.http
                .get(self.url("animals/search"))
                .query(&[("name", name)]),
        )
        .await
    }

    /// Create an animal; the endpoint follows the animal's kind
    pub async fn create_animal(&self, animal: &NewAnimal) -> ClinicResult<Animal> {
        let path = match animal.kind {
            AnimalKind::Dog { .. } => "animals/dog",
            AnimalKind::Cat { .. } => "animals/cat",
            AnimalKind::Other => "animals",
        };
        info!("Registering {} {}", animal.kind.label(), animal.name);
        self.fetch(self.http.post(self.url(path)).json(animal)).await
    }

    pub async fn update_animal(&self, id: u64, animal: &NewAnimal) -> ClinicResult<Animal> {
        info!("Updating animal {}", id);
        self.fetch(self.http.put(self.url(&format!("animals/{id}"))).json(animal))
            .await
    }

    pub async fn delete_animal(&self, id: u64) -> ClinicResult<()> {
        info!("Deleting animal {}", id);
        self.execute(self.http.delete(self.url(&format!("animals/{id}"))))
            .await
    }

    pub async fn animal_stats(&self) -> ClinicResult<AnimalStats> {
        self.fetch(self.http.get(self.url("animals/stats"))).await
    }

    // -- Medical records --

    /// The animal's chart, `None` when none was opened yet
    pub async fn medical_record(&self, animal_id: u64) -> ClinicResult<Option<MedicalRecord>> {
        debug!("GET medical record of animal {}", animal_id);
        let request = self
            .http
            .get(self.url(&format!("medical-records/animal/{animal_id}")));
        match self.fetch(request).await {
            Ok(record) => Ok(Some(record)),
            Err(ClinicError::Status { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn save_medical_record(
        &self,
        animal_id: u64,
        record: &MedicalRecord,
    ) -> ClinicResult<MedicalRecord> {
        info!("Saving medical record of animal {}", animal_id);
        self.fetch(
            self.http
                .put(self.url(&format!("medical-records/animal/{animal_id}")))
                .json(record),
        )
        .await
    }

    // -- Vaccinations --

    pub async fn list_vaccinations(&self, animal_id: u64) -> ClinicResult<Vec<VaccinationRecord>> {
        debug!("GET vaccinations of animal {}", animal_id);
        self.fetch(
            self.http
                .get(self.url(&format!("vaccinations/animal/{animal_id}"))),
        )
        .await
    }

    pub async fn create_vaccination(
        &self,
        animal_id: u64,
        vaccination: &NewVaccination,
    ) -> ClinicResult<VaccinationRecord> {
        info!("Registering {} for animal {}", vaccination.name, animal_id);
        self.fetch(
            self.http
                .post(self.url(&format!("vaccinations/animal/{animal_id}")))
                .json(vaccination),
        )
        .await
    }

    pub async fn mark_vaccination_complete(&self, id: u64) -> ClinicResult<()> {
        info!("Marking vaccination {} complete", id);
        self.execute(
            self.http
                .put(self.url(&format!("vaccinations/{id}/complete"))),
        )
        .await
    }

    pub async fn delete_vaccination(&self, id: u64) -> ClinicResult<()> {
        info!("Deleting vaccination {}", id);
        self.execute(self.http.delete(self.url(&format!("vaccinations/{id}"))))
            .await
    }

    /// Server-filtered overdue list
    pub async fn overdue_vaccinations(&self) -> ClinicResult<Vec<VaccinationRecord>> {
        self.fetch(self.http.get(self.url("vaccinations/overdue")))
            .await
    }

    /// Server-filtered due-soon list
    pub async fn due_soon_vaccinations(&self) -> ClinicResult<Vec<VaccinationRecord>> {
        self.fetch(self.http.get(self.url("vaccinations/due-soon")))
            .await
    }
}
