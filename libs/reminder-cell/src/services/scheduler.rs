// libs/reminder-cell/src/services/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use appointment_cell::{Appointment, AppointmentStatus, AppointmentsApi};
use shared_config::AppConfig;

use crate::models::{
    NotificationSeverity, ReminderBucket, ReminderError, ReminderNotification,
};
use crate::services::seen_set::SeenSetStore;

/// Auto-dismiss duration for same-day reminders.
const HOJE_DISMISS: Duration = Duration::from_secs(10);
/// Auto-dismiss duration for next-day reminders.
const PROXIMA_DISMISS: Duration = Duration::from_secs(12);

/// Where raised reminders go. The scheduler never renders anything itself.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: ReminderNotification);
}

/// Forwards notifications into an unbounded channel, for the UI layer and
/// for tests.
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ReminderNotification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReminderNotification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn notify(&self, notification: ReminderNotification) {
        // A closed receiver just means no one is listening anymore.
        let _ = self.sender.send(notification);
    }
}

/// Writes notifications to the log, used by the headless app.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, notification: ReminderNotification) {
        info!(
            "[{}] {} - {}",
            notification.bucket, notification.title, notification.message
        );
    }
}

#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// Delay before the first evaluation, so startup work settles first.
    pub startup_delay: Duration,
    /// Fixed re-evaluation cadence.
    pub poll_interval: Duration,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_secs(3),
            poll_interval: Duration::from_secs(60),
        }
    }
}

impl ReminderConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            startup_delay: Duration::from_secs(config.reminder_startup_delay_secs),
            poll_interval: Duration::from_secs(config.reminder_poll_interval_secs),
        }
    }
}

/// Buckets an appointment by time-to-start. Returns `None` for past
/// appointments, statuses that no longer need reminding, and gaps between
/// the windows (2h..same-day-boundary and 48h+).
pub fn classify(now: NaiveDateTime, appointment: &Appointment) -> Option<ReminderBucket> {
    if !matches!(
        appointment.status,
        AppointmentStatus::Scheduled | AppointmentStatus::Rescheduled
    ) {
        return None;
    }

    let delta = appointment.scheduled_at - now;
    if delta <= chrono::Duration::zero() {
        return None;
    }

    if delta <= chrono::Duration::hours(2) {
        return Some(ReminderBucket::Urgente);
    }
    if appointment.scheduled_at.date() == now.date() {
        return Some(ReminderBucket::Hoje);
    }
    if delta > chrono::Duration::hours(24) && delta <= chrono::Duration::hours(48) {
        return Some(ReminderBucket::Proxima);
    }

    None
}

/// Builds the patient-facing notification for a bucketed appointment.
pub fn build_notification(
    appointment: &Appointment,
    bucket: ReminderBucket,
    now: NaiveDateTime,
) -> ReminderNotification {
    let specialty = appointment
        .specialty_name
        .as_deref()
        .unwrap_or("consulta");
    let when = appointment.scheduled_at.format("%d/%m %H:%M");

    match bucket {
        ReminderBucket::Urgente => {
            let minutes_left =
                ((appointment.scheduled_at - now).num_seconds() as f64 / 60.0).round() as i64;
            ReminderNotification {
                appointment_id: appointment.id,
                bucket,
                severity: NotificationSeverity::Error,
                title: "Consulta em breve!".to_string(),
                message: format!(
                    "Sua consulta de {} começa em {} minutos! {}",
                    specialty, minutes_left, when
                ),
                link_to: "/minhas-consultas",
                link_text: "Ver consultas",
                auto_dismiss: None,
            }
        }
        ReminderBucket::Hoje => ReminderNotification {
            appointment_id: appointment.id,
            bucket,
            severity: NotificationSeverity::Warning,
            title: "Consulta hoje".to_string(),
            message: format!(
                "Você tem consulta de {} hoje às {}",
                specialty,
                appointment.scheduled_at.format("%H:%M")
            ),
            link_to: "/minhas-consultas",
            link_text: "Ver detalhes",
            auto_dismiss: Some(HOJE_DISMISS),
        },
        ReminderBucket::Proxima => ReminderNotification {
            appointment_id: appointment.id,
            bucket,
            severity: NotificationSeverity::Info,
            title: "Lembrete de consulta".to_string(),
            message: format!(
                "Sua consulta de {} está agendada para amanhã ({})",
                specialty, when
            ),
            link_to: "/minhas-consultas",
            link_text: "Ver consultas",
            auto_dismiss: Some(PROXIMA_DISMISS),
        },
    }
}

/// Polls the logged-in patient's appointments and raises each bucketed
/// reminder at most once per 24h window, durably across restarts.
pub struct ReminderScheduler {
    api: AppointmentsApi,
    seen: SeenSetStore,
    sink: Arc<dyn NotificationSink>,
    patient_id: i64,
    config: ReminderConfig,
}

impl ReminderScheduler {
    pub fn new(
        api: AppointmentsApi,
        seen: SeenSetStore,
        sink: Arc<dyn NotificationSink>,
        patient_id: i64,
        config: ReminderConfig,
    ) -> Self {
        Self {
            api,
            seen,
            sink,
            patient_id,
            config,
        }
    }

    /// Evaluate all eligible appointments once. Exposed so callers can
    /// refresh on demand between ticks.
    pub async fn check_now(&self) -> Result<(), ReminderError> {
        let appointments = self.api.find_all().await?;
        let now = Local::now().naive_local();
        let now_utc = Utc::now();

        for appointment in appointments
            .iter()
            .filter(|a| a.patient_id == self.patient_id)
        {
            let Some(bucket) = classify(now, appointment) else {
                continue;
            };

            if self
                .seen
                .was_notified(appointment.id, bucket, now_utc)
                .await?
            {
                continue;
            }

            debug!(
                "Raising {} reminder for appointment {}",
                bucket, appointment.id
            );
            self.sink
                .notify(build_notification(appointment, bucket, now))
                .await;
            self.seen
                .mark_notified(appointment.id, bucket, now_utc)
                .await?;
        }

        Ok(())
    }

    /// Start polling. Consumes the scheduler and returns a handle the
    /// caller MUST stop on logout or teardown; a timer that outlives the
    /// session is a defect, so nothing here relies on drop order or GC.
    pub async fn start(self) -> SchedulerHandle {
        // Old records are discarded once per start, bounding slot growth.
        if let Err(e) = self.seen.prune(Utc::now()).await {
            warn!("Failed to prune reminder seen-set: {}", e);
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let startup_delay = self.config.startup_delay;
        let poll_interval = self.config.poll_interval;

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(startup_delay) => {}
                _ = shutdown_rx.changed() => {
                    debug!("Reminder scheduler stopped before first check");
                    return;
                }
            }

            self.run_check().await;

            let mut ticker = tokio::time::interval(poll_interval);
            // An interval's first tick completes immediately and would
            // double up with the startup check.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_check().await;
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            debug!("Reminder scheduler loop ended");
        });

        info!(
            "Reminder scheduler started (every {:?} after {:?})",
            poll_interval, startup_delay
        );

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    /// A failed tick is logged and swallowed: a missed reminder is
    /// recoverable at the next tick and must not interrupt the patient.
    async fn run_check(&self) {
        if let Err(e) = self.check_now().await {
            error!("Failed to check upcoming appointments: {}", e);
        }
    }
}

/// Cancellable handle to the polling task.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal shutdown and wait for the loop to finish. After this returns
    /// no further tick can fire.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
