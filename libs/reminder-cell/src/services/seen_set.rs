// libs/reminder-cell/src/services/seen_set.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use shared_storage::{KeyValueStore, StorageError};

use crate::models::{ReminderBucket, ReminderRecord};

/// Storage slot key, kept identical to the web client's localStorage key so
/// an existing seen-set survives the migration.
pub const SEEN_SET_KEY: &str = "hc_notificacoes_mostradas";

/// A fired (appointment, bucket) pair suppresses re-notification for 24h.
const DEDUP_WINDOW_HOURS: i64 = 24;

/// Records older than this are discarded on scheduler start.
const RETENTION_DAYS: i64 = 7;

/// Durable set of already-fired reminders, persisted as one ordered JSON
/// array in a single key-value slot. Reads and writes always cover the
/// whole slot; there are no partial updates.
#[derive(Clone)]
pub struct SeenSetStore {
    store: Arc<dyn KeyValueStore>,
}

impl SeenSetStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load all records. A missing or corrupt slot reads as empty, matching
    /// the tolerant reads of the storage this replaces.
    pub async fn load(&self) -> Result<Vec<ReminderRecord>, StorageError> {
        let raw = match self.store.get(SEEN_SET_KEY).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Discarding corrupt reminder seen-set: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[ReminderRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.store.set(SEEN_SET_KEY, &raw).await
    }

    /// True iff a record for this exact (appointment, bucket) pair was fired
    /// within the last 24 hours.
    pub async fn was_notified(
        &self,
        appointment_id: i64,
        bucket: ReminderBucket,
        now: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let cutoff = now - Duration::hours(DEDUP_WINDOW_HOURS);
        let records = self.load().await?;

        Ok(records.iter().any(|r| {
            r.appointment_id == appointment_id && r.bucket == bucket && r.fired_at > cutoff
        }))
    }

    /// Append a fired record for the pair.
    pub async fn mark_notified(
        &self,
        appointment_id: i64,
        bucket: ReminderBucket,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut records = self.load().await?;
        records.push(ReminderRecord {
            appointment_id,
            bucket,
            fired_at: now,
        });
        self.save(&records).await
    }

    /// Drop records older than the retention window to bound slot growth.
    pub async fn prune(&self, now: DateTime<Utc>) -> Result<(), StorageError> {
        let cutoff = now - Duration::days(RETENTION_DAYS);
        let records = self.load().await?;
        let kept: Vec<ReminderRecord> =
            records.into_iter().filter(|r| r.fired_at > cutoff).collect();

        debug!("Reminder seen-set pruned to {} records", kept.len());
        self.save(&kept).await
    }
}
