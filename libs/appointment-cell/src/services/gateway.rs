// libs/appointment-cell/src/services/gateway.rs
use std::sync::Arc;

use chrono::NaiveDateTime;
use reqwest::Method;
use tracing::{debug, info};

use shared_gateway::{ApiClient, GatewayError};

use crate::models::{Appointment, AppointmentStatus, BookAppointmentRequest};

/// Thin contract over the remote appointment resource. This client consumes
/// the backend, it does not design it: `cancel` and `reschedule` are the
/// backend's documented get-then-replace convenience flows.
#[derive(Clone)]
pub struct AppointmentsApi {
    client: Arc<ApiClient>,
}

impl AppointmentsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn find_all(&self) -> Result<Vec<Appointment>, GatewayError> {
        self.client.request(Method::GET, "/consultas", None).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Appointment, GatewayError> {
        self.client
            .request(Method::GET, &format!("/consultas/{}", id), None)
            .await
    }

    pub async fn save(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, GatewayError> {
        debug!("Creating appointment for patient {}", request.patient_id);
        self.client
            .request(
                Method::POST,
                "/consultas",
                Some(serde_json::to_value(request).map_err(transport_from_serde)?),
            )
            .await
    }

    /// Full replace of the record, the backend's only update shape.
    pub async fn update(
        &self,
        id: i64,
        appointment: &Appointment,
    ) -> Result<Appointment, GatewayError> {
        self.client
            .request(
                Method::PUT,
                &format!("/consultas/{}", id),
                Some(serde_json::to_value(appointment).map_err(transport_from_serde)?),
            )
            .await
    }

    /// Fetches the current record and replaces it with status CANCELADA.
    pub async fn cancel(&self, id: i64) -> Result<Appointment, GatewayError> {
        info!("Cancelling appointment {}", id);

        let mut appointment = self.find_by_id(id).await?;
        appointment.status = AppointmentStatus::Cancelled;
        self.update(id, &appointment).await
    }

    /// Fetches the current record and replaces it with the new date/time and
    /// status REAGENDADA.
    pub async fn reschedule(
        &self,
        id: i64,
        new_datetime: NaiveDateTime,
    ) -> Result<Appointment, GatewayError> {
        info!("Rescheduling appointment {} to {}", id, new_datetime);

        let mut appointment = self.find_by_id(id).await?;
        appointment.scheduled_at = new_datetime;
        appointment.status = AppointmentStatus::Rescheduled;
        self.update(id, &appointment).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        info!("Deleting appointment {}", id);
        self.client
            .request_no_content(Method::DELETE, &format!("/consultas/{}", id), None)
            .await
    }
}

// Serializing our own request models cannot realistically fail; mapping
// through the Api variant keeps the signature honest without a new variant.
fn transport_from_serde(e: serde_json::Error) -> GatewayError {
    GatewayError::Api {
        status: 0,
        message: format!("payload serialization failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceType;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn appointment_wire_format_round_trips() {
        let raw = json!({
            "idConsulta": 42,
            "protocolo": "HC-2025-0042",
            "dataConsulta": "2025-08-20T09:30:00",
            "status": "AGENDADA",
            "tipoAtendimento": "PRESENCIAL",
            "idPaciente": 7,
            "idMedico": 3,
            "idUnidade": 1,
            "idEspecialidade": 5,
            "nomeEspecialidade": "Cardiologia"
        });

        let appointment: Appointment = serde_json::from_value(raw).unwrap();
        assert_eq!(appointment.id, 42);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(
            appointment.scheduled_at,
            NaiveDate::from_ymd_opt(2025, 8, 20)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        );
        assert_eq!(appointment.specialty_name.as_deref(), Some("Cardiologia"));

        let back = serde_json::to_value(&appointment).unwrap();
        assert_eq!(back["dataConsulta"], "2025-08-20T09:30:00");
        assert_eq!(back["status"], "AGENDADA");
        // absent names stay absent
        assert!(back.get("nomeMedico").is_none());
    }

    #[test]
    fn create_payload_omits_backend_assigned_fields() {
        let request = BookAppointmentRequest {
            scheduled_at: NaiveDate::from_ymd_opt(2025, 8, 20)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            status: AppointmentStatus::Scheduled,
            attendance_type: AttendanceType::InPerson,
            patient_id: 7,
            doctor_id: 3,
            facility_id: 1,
            specialty_id: 5,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("idConsulta").is_none());
        assert!(value.get("protocolo").is_none());
        assert_eq!(value["tipoAtendimento"], "PRESENCIAL");
    }
}
