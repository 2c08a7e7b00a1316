//! The persistent glucose record collection.
//!
//! Records are kept most recent first. The only mutation is [`RecordStore::append`],
//! which re-sorts the full collection and overwrites the persisted blob before
//! the in-memory collection changes.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{parse_level, sort_descending, GlicemiaRecord};
use crate::storage::{BlobStorage, StorageError, RECORDS_KEY};

/// Errors that can occur while persisting the record collection.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of an append attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The record was added and persisted.
    Added,
    /// The level text was not a usable number; nothing changed.
    Ignored,
}

/// Handle returned by [`RecordStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&[GlicemiaRecord])>;

pub struct RecordStore {
    storage: Box<dyn BlobStorage>,
    records: Vec<GlicemiaRecord>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl RecordStore {
    /// Loads the persisted collection.
    ///
    /// A missing blob, an unreadable blob or one that fails to deserialize all
    /// yield an empty store.
    pub fn load(storage: impl BlobStorage + 'static) -> Self {
        let records = match storage.read(RECORDS_KEY) {
            Ok(Some(contents)) => match serde_json::from_str::<Vec<GlicemiaRecord>>(&contents) {
                Ok(mut records) => {
                    sort_descending(&mut records);
                    tracing::debug!("Loaded {} record(s)", records.len());
                    records
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable {}: {}", RECORDS_KEY, e);
                    Vec::new()
                }
            },
            Ok(None) => {
                tracing::debug!("No {} found, starting with 0 records", RECORDS_KEY);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", RECORDS_KEY, e);
                Vec::new()
            }
        };

        Self {
            storage: Box::new(storage),
            records,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Records, most recent first.
    pub fn records(&self) -> &[GlicemiaRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a record for `date` if `level` parses as a number.
    ///
    /// Invalid level text is ignored without touching storage. On a
    /// persistence error the in-memory collection is left as it was.
    pub fn append(&mut self, date: DateTime<Utc>, level: &str) -> Result<AppendOutcome, StoreError> {
        let Some(level) = parse_level(level) else {
            tracing::debug!("Ignoring invalid level input {:?}", level);
            return Ok(AppendOutcome::Ignored);
        };

        let mut updated = self.records.clone();
        updated.push(GlicemiaRecord::new(date, level));
        sort_descending(&mut updated);

        let json = serde_json::to_string(&updated)?;
        self.storage.write(RECORDS_KEY, &json)?;
        tracing::debug!("Persisted {} record(s)", updated.len());

        self.records = updated;
        self.notify();

        Ok(AppendOutcome::Added)
    }

    /// Registers a callback invoked with the full collection after every append.
    pub fn subscribe(&mut self, callback: impl Fn(&[GlicemiaRecord]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.records);
        }
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
