// libs/appointment-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use shared_gateway::GatewayError;

use crate::services::validation::{BookingValidationError, RescheduleValidationError};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// An appointment as the backend serves it. Field names on the wire follow
/// the backend's Portuguese contract (`idConsulta`, `dataConsulta`, ...).
///
/// `scheduled_at` carries no offset on the wire and is interpreted as local
/// clinic wall-clock time; it is the sole temporal anchor for lifecycle and
/// reminder logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "idConsulta")]
    pub id: i64,
    #[serde(rename = "protocolo")]
    pub protocol: String,
    #[serde(rename = "dataConsulta")]
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(rename = "tipoAtendimento")]
    pub attendance_type: AttendanceType,
    #[serde(rename = "idPaciente")]
    pub patient_id: i64,
    #[serde(rename = "idMedico")]
    pub doctor_id: i64,
    #[serde(rename = "idUnidade")]
    pub facility_id: i64,
    #[serde(rename = "idEspecialidade")]
    pub specialty_id: i64,

    // Denormalized display names, present on detail reads only.
    #[serde(rename = "nomePaciente", skip_serializing_if = "Option::is_none", default)]
    pub patient_name: Option<String>,
    #[serde(rename = "nomeMedico", skip_serializing_if = "Option::is_none", default)]
    pub doctor_name: Option<String>,
    #[serde(rename = "nomeUnidade", skip_serializing_if = "Option::is_none", default)]
    pub facility_name: Option<String>,
    #[serde(rename = "nomeEspecialidade", skip_serializing_if = "Option::is_none", default)]
    pub specialty_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    #[serde(rename = "AGENDADA")]
    Scheduled,
    #[serde(rename = "REAGENDADA")]
    Rescheduled,
    #[serde(rename = "CONCLUIDA")]
    Completed,
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "AGENDADA"),
            AppointmentStatus::Rescheduled => write!(f, "REAGENDADA"),
            AppointmentStatus::Completed => write!(f, "CONCLUIDA"),
            AppointmentStatus::Cancelled => write!(f, "CANCELADA"),
        }
    }
}

impl AppointmentStatus {
    /// True iff the patient may still cancel or reschedule.
    pub fn can_modify(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Rescheduled
        )
    }

    /// True iff the record may be removed entirely. Only cancelled
    /// appointments are deletable.
    pub fn can_delete(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }

    /// User-facing label. Exhaustive on purpose: adding a status without a
    /// label is a compile error, not a silent fallback.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Agendada",
            AppointmentStatus::Rescheduled => "Reagendada",
            AppointmentStatus::Completed => "Concluída",
            AppointmentStatus::Cancelled => "Cancelada",
        }
    }

    /// Style tag used by the rendering layer for the status badge.
    pub fn css_tag(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "status-agendada",
            AppointmentStatus::Rescheduled => "status-reagendada",
            AppointmentStatus::Completed => "status-concluida",
            AppointmentStatus::Cancelled => "status-cancelada",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttendanceType {
    #[serde(rename = "PRESENCIAL")]
    InPerson,
    #[serde(rename = "TELECONSULTA")]
    Teleconsultation,
}

impl fmt::Display for AttendanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceType::InPerson => write!(f, "PRESENCIAL"),
            AttendanceType::Teleconsultation => write!(f, "TELECONSULTA"),
        }
    }
}

impl AttendanceType {
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceType::InPerson => "Presencial",
            AttendanceType::Teleconsultation => "Teleconsulta",
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Creation payload. The backend assigns `idConsulta` and `protocolo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(rename = "dataConsulta")]
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(rename = "tipoAtendimento")]
    pub attendance_type: AttendanceType,
    #[serde(rename = "idPaciente")]
    pub patient_id: i64,
    #[serde(rename = "idMedico")]
    pub doctor_id: i64,
    #[serde(rename = "idUnidade")]
    pub facility_id: i64,
    #[serde(rename = "idEspecialidade")]
    pub specialty_id: i64,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("Only cancelled appointments can be deleted, current status: {0}")]
    NotDeletable(AppointmentStatus),

    #[error(transparent)]
    Validation(#[from] BookingValidationError),

    #[error(transparent)]
    RescheduleValidation(#[from] RescheduleValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
