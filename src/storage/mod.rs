//! Persistence gateway - key/value storage the entity stores bind to.
//!
//! Each store owns one [`StoreKey`] and writes its whole collection under it
//! as a JSON document on every mutation. Reads happen once, at hydration.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use oshi_tally::storage::{Gateway, InMemoryStorage, StoreKey};
//!
//! let gateway = Gateway::inline(Arc::new(InMemoryStorage::new()));
//! gateway.save(StoreKey::Memos, &memos);
//! let loaded: Option<MemoDocument> = gateway.load(StoreKey::Memos);
//! ```

mod file;
mod gateway;
mod in_memory;
mod worker;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

pub use file::FileStorage;
pub use gateway::Gateway;
pub use in_memory::InMemoryStorage;
pub use worker::{PersistWorker, WriteStats};

/// Abstract durable key/value storage.
///
/// Payloads are complete serialized documents; backends never merge.
pub trait Storage: Send + Sync {
    /// Read the payload stored under `key`. Returns `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload stored under `key`.
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Remove `key`. Returns true if it existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// All keys currently stored.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// The stable storage key of each store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreKey {
    Groups,
    Members,
    Tickets,
    Counts,
    Memos,
}

impl StoreKey {
    pub const ALL: [StoreKey; 5] = [
        StoreKey::Groups,
        StoreKey::Members,
        StoreKey::Tickets,
        StoreKey::Counts,
        StoreKey::Memos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Groups => "group-records",
            StoreKey::Members => "member-records",
            StoreKey::Tickets => "ticket-records",
            StoreKey::Counts => "count-records",
            StoreKey::Memos => "memo-records",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
