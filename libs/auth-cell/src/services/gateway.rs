// libs/auth-cell/src/services/gateway.rs
use std::sync::Arc;

use reqwest::Method;

use shared_gateway::{ApiClient, GatewayError};

use crate::models::{Patient, PatientCreate};

#[derive(Clone)]
pub struct PatientsApi {
    client: Arc<ApiClient>,
}

impl PatientsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn find_all(&self) -> Result<Vec<Patient>, GatewayError> {
        self.client.request(Method::GET, "/pacientes", None).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Patient, GatewayError> {
        self.client
            .request(Method::GET, &format!("/pacientes/{}", id), None)
            .await
    }

    pub async fn save(&self, patient: &PatientCreate) -> Result<Patient, GatewayError> {
        let body = serde_json::to_value(patient).map_err(|e| GatewayError::Api {
            status: 0,
            message: format!("payload serialization failed: {}", e),
        })?;
        self.client.request(Method::POST, "/pacientes", Some(body)).await
    }
}
