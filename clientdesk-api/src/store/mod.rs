//! Document-style record store with push-based snapshots.
//!
//! Every write is followed by a full snapshot of the written collection
//! delivered to that collection's subscribers. Subscribing delivers the
//! current snapshot right away, so a subscriber never has to read first.

pub mod clients;
pub mod projects;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::{records, AsyncDbConnection};
use crate::helpers::listeners::{Listeners, Subscription};

/// Record id to record fields. Ids are time-ordered, so iteration follows creation order.
pub type Snapshot = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Clients,
    Projects,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Clients, Collection::Projects];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Projects => "projects",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Write to {0} failed: {1}")]
    WriteFailed(&'static str, String),

    #[error("Read of {0} failed: {1}")]
    ReadFailed(&'static str, String),

    #[error("Record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct RecordStore {
    conn: AsyncDbConnection,
    listeners: HashMap<Collection, Listeners<Snapshot>>,
    // Serializes write+publish against subscribe so snapshots arrive in order
    publish_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(conn: AsyncDbConnection) -> Self {
        let listeners = Collection::ALL
            .into_iter()
            .map(|collection| (collection, Listeners::new()))
            .collect();

        Self {
            conn,
            listeners,
            publish_lock: Mutex::new(()),
        }
    }

    /// Append `record` under a freshly generated id and publish the new snapshot
    pub async fn push<T: Serialize>(
        &self,
        collection: Collection,
        record: &T,
    ) -> Result<String, StoreError> {
        let fields = serde_json::to_value(record)?;
        let _guard = self.publish_lock.lock().await;

        let id = Uuid::now_v7().to_string();
        records::insert_record(self.conn.clone(), collection.as_str(), &id, &fields)
            .await
            .map_err(|e| StoreError::WriteFailed(collection.as_str(), e.to_string()))?;

        info!("Added record {} to {}", id, collection.as_str());

        // The write already succeeded; a failed re-read only delays subscribers
        match self.read_snapshot(collection).await {
            Ok(snapshot) => self.listeners_for(collection).notify(&snapshot),
            Err(e) => warn!("Could not publish {} snapshot: {}", collection.as_str(), e),
        }

        Ok(id)
    }

    /// Full copy of a collection. An empty collection is an empty snapshot.
    pub async fn snapshot(&self, collection: Collection) -> Result<Snapshot, StoreError> {
        self.read_snapshot(collection).await
    }

    /// Register `listener` for `collection` and hand it the current snapshot
    pub async fn subscribe<F>(
        &self,
        collection: Collection,
        listener: F,
    ) -> Result<Subscription, StoreError>
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let _guard = self.publish_lock.lock().await;
        let snapshot = self.read_snapshot(collection).await?;

        let listener = Arc::new(listener);
        listener(&snapshot);
        Ok(self.listeners_for(collection).subscribe_arc(listener))
    }

    pub async fn contains(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        records::record_exists(self.conn.clone(), collection.as_str(), id)
            .await
            .map_err(|e| StoreError::ReadFailed(collection.as_str(), e.to_string()))
    }

    pub fn subscriber_count(&self, collection: Collection) -> usize {
        self.listeners_for(collection).len()
    }

    async fn read_snapshot(&self, collection: Collection) -> Result<Snapshot, StoreError> {
        let rows = records::list_records(self.conn.clone(), collection.as_str())
            .await
            .map_err(|e| StoreError::ReadFailed(collection.as_str(), e.to_string()))?;
        Ok(rows.into_iter().collect())
    }

    fn listeners_for(&self, collection: Collection) -> &Listeners<Snapshot> {
        // Populated for every collection in new()
        &self.listeners[&collection]
    }
}

/// Decode every document of a snapshot into `T`, injecting the record id.
/// Documents that do not fit `T` are skipped.
pub fn decode_records<T: DeserializeOwned>(snapshot: &Snapshot, kind: &str) -> Vec<T> {
    snapshot
        .iter()
        .filter_map(|(id, fields)| {
            let mut fields = fields.clone();
            if let Some(object) = fields.as_object_mut() {
                object.insert("id".to_string(), serde_json::Value::String(id.clone()));
            }
            match serde_json::from_value(fields) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping malformed {} record {}: {}", kind, id, e);
                    None
                }
            }
        })
        .collect()
}
