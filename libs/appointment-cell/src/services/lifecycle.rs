// libs/appointment-cell/src/services/lifecycle.rs
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::models::{Appointment, AppointmentError, AppointmentStatus};
use crate::services::gateway::AppointmentsApi;
use crate::services::validation::validate_reschedule;

/// Governs which mutations an appointment admits in each status, and runs
/// the patient-triggered transitions against the gateway.
///
/// Every mutating operation re-fetches the current record first so a stale
/// card in the UI cannot cancel or delete something the backend has already
/// moved on. Guard failures abort before any network mutation and are never
/// retried; gateway failures surface to the caller for a manual retry.
pub struct AppointmentLifecycleService {
    api: AppointmentsApi,
}

impl AppointmentLifecycleService {
    pub fn new(api: AppointmentsApi) -> Self {
        Self { api }
    }

    /// Validate that a status transition is allowed.
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!(
            "Validating status transition from {} to {}",
            current_status, new_status
        );

        if !self
            .valid_transitions(current_status)
            .contains(&new_status)
        {
            warn!(
                "Invalid status transition attempted: {} -> {}",
                current_status, new_status
            );
            return Err(AppointmentError::InvalidStatusTransition(current_status));
        }

        Ok(())
    }

    /// All statuses the patient side may move an appointment into from the
    /// given one. CONCLUIDA is only ever set by the backend, so nothing
    /// transitions into it here, and nothing leaves it.
    pub fn valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::Rescheduled,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Rescheduled => vec![
                // Re-rescheduling keeps the same status.
                AppointmentStatus::Rescheduled,
                AppointmentStatus::Cancelled,
            ],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }

    /// Cancel an appointment. Allowed only while it can still be modified.
    pub async fn cancel(&self, id: i64) -> Result<Appointment, AppointmentError> {
        let current = self.api.find_by_id(id).await?;

        if !current.status.can_modify() {
            warn!(
                "Refusing to cancel appointment {} in status {}",
                id, current.status
            );
            return Err(AppointmentError::InvalidStatusTransition(current.status));
        }

        let cancelled = self.api.cancel(id).await?;
        info!("Appointment {} cancelled", id);
        Ok(cancelled)
    }

    /// Move an appointment to a new date and time. The reschedule policy
    /// ([08:00, 18:00], 30-minute steps) is checked after the guard, before
    /// any mutation is issued.
    pub async fn reschedule(
        &self,
        id: i64,
        new_datetime: NaiveDateTime,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.api.find_by_id(id).await?;

        if !current.status.can_modify() {
            warn!(
                "Refusing to reschedule appointment {} in status {}",
                id, current.status
            );
            return Err(AppointmentError::InvalidStatusTransition(current.status));
        }

        validate_reschedule(Some(new_datetime), Local::now().naive_local())?;

        let rescheduled = self.api.reschedule(id, new_datetime).await?;
        info!("Appointment {} rescheduled to {}", id, new_datetime);
        Ok(rescheduled)
    }

    /// Remove a cancelled appointment permanently.
    pub async fn delete(&self, id: i64) -> Result<(), AppointmentError> {
        let current = self.api.find_by_id(id).await?;

        if !current.status.can_delete() {
            warn!(
                "Refusing to delete appointment {} in status {}",
                id, current.status
            );
            return Err(AppointmentError::NotDeletable(current.status));
        }

        self.api.delete(id).await?;
        info!("Appointment {} deleted", id);
        Ok(())
    }
}
