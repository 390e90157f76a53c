//! Background writer thread for store snapshots.
//!
//! Stores hand full-collection snapshots to the worker and return
//! immediately. The worker drains whatever has queued up, keeps only the
//! newest snapshot per key and writes it, so a burst of mutations costs one
//! write per key.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::Storage;

pub(crate) enum PersistJob {
    Write { key: String, payload: String },
    Remove { keys: Vec<String> },
    Flush(Sender<()>),
    Stop,
}

/// Statistics from the persist worker.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteStats {
    pub writes: usize,
    pub removals: usize,
    pub failures: usize,
    /// Snapshots dropped because a newer one for the same key arrived first.
    pub coalesced: usize,
}

/// A background thread that writes queued snapshots to a [`Storage`].
///
/// ## Example
///
/// ```ignore
/// let (gateway, worker) = Gateway::background(Arc::new(storage));
/// // ... mutate stores bound to `gateway` ...
/// let stats = worker.stop();
/// println!("wrote {} snapshots", stats.writes);
/// ```
pub struct PersistWorker {
    tx: Sender<PersistJob>,
    handle: Option<JoinHandle<WriteStats>>,
}

impl PersistWorker {
    pub(crate) fn spawn(backend: Arc<dyn Storage>) -> Self {
        let (tx, rx) = channel();
        let handle = thread::Builder::new()
            .name("tally-persist".into())
            .spawn(move || run(backend, rx));

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "failed to spawn persist worker; snapshots will be dropped");
                None
            }
        };

        Self { tx, handle }
    }

    pub(crate) fn sender(&self) -> Sender<PersistJob> {
        self.tx.clone()
    }

    /// Signal the worker to stop, wait for pending writes and return the
    /// worker statistics.
    pub fn stop(mut self) -> WriteStats {
        let _ = self.tx.send(PersistJob::Stop);
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_default(),
            None => WriteStats::default(),
        }
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(PersistJob::Stop);
        // Queued snapshots exist nowhere else; wait for them to be written.
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(backend: Arc<dyn Storage>, rx: Receiver<PersistJob>) -> WriteStats {
    let mut stats = WriteStats::default();
    let mut pending: HashMap<String, String> = HashMap::new();

    while let Ok(first) = rx.recv() {
        let mut batch = vec![first];
        batch.extend(rx.try_iter());

        let mut stop = false;
        for job in batch {
            match job {
                PersistJob::Write { key, payload } => {
                    if pending.insert(key, payload).is_some() {
                        stats.coalesced += 1;
                    }
                }
                PersistJob::Remove { keys } => {
                    for key in keys {
                        pending.remove(&key);
                        match backend.remove(&key) {
                            Ok(_) => stats.removals += 1,
                            Err(err) => {
                                stats.failures += 1;
                                warn!(key = %key, error = %err, "failed to remove persisted snapshot");
                            }
                        }
                    }
                }
                PersistJob::Flush(ack) => {
                    write_pending(backend.as_ref(), &mut pending, &mut stats);
                    let _ = ack.send(());
                }
                PersistJob::Stop => stop = true,
            }
        }

        write_pending(backend.as_ref(), &mut pending, &mut stats);
        if stop {
            break;
        }
    }

    debug!(?stats, "persist worker stopped");
    stats
}

fn write_pending(backend: &dyn Storage, pending: &mut HashMap<String, String>, stats: &mut WriteStats) {
    for (key, payload) in pending.drain() {
        match backend.write(&key, &payload) {
            Ok(()) => stats.writes += 1,
            Err(err) => {
                stats.failures += 1;
                warn!(key = %key, error = %err, "failed to persist snapshot");
            }
        }
    }
}
