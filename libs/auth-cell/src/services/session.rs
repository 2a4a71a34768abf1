// libs/auth-cell/src/services/session.rs
use std::sync::Arc;

use tracing::{info, warn};

use shared_storage::{KeyValueStore, StorageError};

use crate::models::Patient;

/// Storage slot key, identical to the web client's localStorage session key.
pub const SESSION_KEY: &str = "hc_paciente_session";

/// Explicitly scoped session state over an injected store. Constructed at
/// startup, torn down via `logout`; nothing here is ambient or global.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn login(&self, patient: &Patient) -> Result<(), StorageError> {
        let raw = serde_json::to_string(patient)?;
        self.store.set(SESSION_KEY, &raw).await?;
        info!("Session started for patient {}", patient.id);
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY).await?;
        info!("Session ended");
        Ok(())
    }

    /// The logged-in patient, if any. A corrupt slot reads as logged out.
    pub async fn current_patient(&self) -> Result<Option<Patient>, StorageError> {
        let raw = match self.store.get(SESSION_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str(&raw) {
            Ok(patient) => Ok(Some(patient)),
            Err(e) => {
                warn!("Discarding corrupt session slot: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn is_logged_in(&self) -> Result<bool, StorageError> {
        Ok(self.current_patient().await?.is_some())
    }
}
