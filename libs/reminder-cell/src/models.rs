// libs/reminder-cell/src/models.rs
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_gateway::GatewayError;
use shared_storage::StorageError;

/// Time-to-appointment window that gates reminder eligibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderBucket {
    /// 24h < Δ ≤ 48h before the appointment.
    Proxima,
    /// Same calendar day, more than 2h away.
    Hoje,
    /// 2h or less away.
    Urgente,
}

impl fmt::Display for ReminderBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderBucket::Proxima => write!(f, "proxima"),
            ReminderBucket::Hoje => write!(f, "hoje"),
            ReminderBucket::Urgente => write!(f, "urgente"),
        }
    }
}

/// Durable record of a fired reminder. Stored as a unit with its siblings
/// in a single storage slot; the wire shape mirrors what the web client
/// already persisted so existing slots keep working.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderRecord {
    #[serde(rename = "consultaId")]
    pub appointment_id: i64,
    #[serde(rename = "tipo")]
    pub bucket: ReminderBucket,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub fired_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSeverity {
    Info,
    Warning,
    Error,
}

/// A reminder surfaced to the patient. `auto_dismiss` of `None` means the
/// notification stays until dismissed by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    pub appointment_id: i64,
    pub bucket: ReminderBucket,
    pub severity: NotificationSeverity,
    pub title: String,
    pub message: String,
    pub link_to: &'static str,
    pub link_text: &'static str,
    pub auto_dismiss: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
