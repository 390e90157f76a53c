//! Gateway - the handle a store uses to hydrate and persist its collection.

use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::worker::{PersistJob, PersistWorker};
use super::{Storage, StoreKey};
use crate::error::StorageError;

/// Serialize-on-write, hydrate-on-load access to a [`Storage`] backend.
///
/// Saves never fail from the caller's point of view: serialization and
/// backend errors are logged and dropped, and the in-memory collection stays
/// the source of truth. With a background writer, saves are queued and
/// written by a [`PersistWorker`]; otherwise they are written inline.
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn Storage>,
    writer: Option<Sender<PersistJob>>,
}

impl Gateway {
    /// A gateway that writes on the caller's thread.
    pub fn inline(backend: Arc<dyn Storage>) -> Self {
        Self {
            backend,
            writer: None,
        }
    }

    /// A gateway whose writes are performed by a background worker.
    pub fn background(backend: Arc<dyn Storage>) -> (Self, PersistWorker) {
        let worker = PersistWorker::spawn(Arc::clone(&backend));
        let gateway = Self {
            backend,
            writer: Some(worker.sender()),
        };
        (gateway, worker)
    }

    pub fn backend(&self) -> &Arc<dyn Storage> {
        &self.backend
    }

    pub fn is_background(&self) -> bool {
        self.writer.is_some()
    }

    /// Load the document stored under `key`.
    ///
    /// Missing documents and documents that fail to read or parse all come
    /// back as `None`; the failures are logged.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let payload = match self.backend.read(key.as_str()) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read persisted snapshot");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key = %key, error = %err, "discarding unreadable persisted snapshot");
                None
            }
        }
    }

    /// Persist a full snapshot under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to serialize snapshot");
                return;
            }
        };

        match &self.writer {
            Some(tx) => {
                let job = PersistJob::Write {
                    key: key.as_str().to_string(),
                    payload,
                };
                if tx.send(job).is_err() {
                    warn!(key = %key, "persist worker stopped; snapshot dropped");
                }
            }
            None => {
                if let Err(err) = self.backend.write(key.as_str(), &payload) {
                    warn!(key = %key, error = %err, "failed to persist snapshot");
                } else {
                    debug!(key = %key, bytes = payload.len(), "snapshot persisted");
                }
            }
        }
    }

    /// Remove every given key. Failures are logged per key.
    pub fn remove_all(&self, keys: &[StoreKey]) {
        match &self.writer {
            Some(tx) => {
                let job = PersistJob::Remove {
                    keys: keys.iter().map(|k| k.as_str().to_string()).collect(),
                };
                if tx.send(job).is_err() {
                    warn!("persist worker stopped; removal dropped");
                }
            }
            None => {
                for key in keys {
                    if let Err(err) = self.backend.remove(key.as_str()) {
                        warn!(key = %key, error = %err, "failed to remove persisted snapshot");
                    }
                }
            }
        }
    }

    /// Block until every snapshot queued so far has been handed to the
    /// backend. A no-op for inline gateways.
    pub fn flush(&self) -> Result<(), StorageError> {
        let Some(tx) = &self.writer else {
            return Ok(());
        };
        let (ack_tx, ack_rx) = channel();
        tx.send(PersistJob::Flush(ack_tx))
            .map_err(|_| StorageError::Closed)?;
        ack_rx.recv().map_err(|_| StorageError::Closed)
    }
}
