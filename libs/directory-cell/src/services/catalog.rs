// libs/directory-cell/src/services/catalog.rs
use std::sync::Arc;

use reqwest::Method;

use shared_gateway::{ApiClient, GatewayError};

use crate::models::{CareService, Doctor, Facility, Specialty};

/// Read access to the browsing catalog: specialties, hospital units,
/// doctors and care services. The patient client only ever reads these;
/// their administration lives elsewhere.
#[derive(Clone)]
pub struct DirectoryService {
    client: Arc<ApiClient>,
}

impl DirectoryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn specialties(&self) -> Result<Vec<Specialty>, GatewayError> {
        self.client.request(Method::GET, "/especialidades", None).await
    }

    pub async fn specialty(&self, id: i64) -> Result<Specialty, GatewayError> {
        self.client
            .request(Method::GET, &format!("/especialidades/{}", id), None)
            .await
    }

    pub async fn facilities(&self) -> Result<Vec<Facility>, GatewayError> {
        self.client.request(Method::GET, "/unidades", None).await
    }

    pub async fn facility(&self, id: i64) -> Result<Facility, GatewayError> {
        self.client
            .request(Method::GET, &format!("/unidades/{}", id), None)
            .await
    }

    pub async fn doctors(&self) -> Result<Vec<Doctor>, GatewayError> {
        self.client.request(Method::GET, "/medicos", None).await
    }

    pub async fn doctor(&self, id: i64) -> Result<Doctor, GatewayError> {
        self.client
            .request(Method::GET, &format!("/medicos/{}", id), None)
            .await
    }

    pub async fn care_services(&self) -> Result<Vec<CareService>, GatewayError> {
        self.client.request(Method::GET, "/servicos", None).await
    }
}

/// Case-insensitive name/description search over a loaded specialty list.
/// An empty term keeps everything.
pub fn filter_specialties(specialties: &[Specialty], term: &str) -> Vec<Specialty> {
    if term.is_empty() {
        return specialties.to_vec();
    }

    let term = term.to_lowercase();
    specialties
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&term)
                || s.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}
