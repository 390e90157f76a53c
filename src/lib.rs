//! Local data layer for a personal ticket tally.
//!
//! Five independently persisted stores (groups, members, ticket types,
//! count records, day memos), pure aggregation over them, and a pluggable
//! key/value persistence gateway. Mutations apply synchronously in memory;
//! snapshots are persisted best-effort, inline or from a background writer.

pub mod aggregate;
pub mod book;
pub mod config;
pub mod date;
mod error;
pub mod format;
pub mod id;
pub mod logging;
pub mod model;
pub mod notify;
pub mod storage;
pub mod store;

pub use aggregate::{DailySummary, DayLine, MemberRanking, MonthlySummary, Totals, UNKNOWN_LABEL};
pub use book::{ExportDocument, SetupIds, TallyBook};
pub use config::{PersistenceBackend, TallyConfig};
pub use error::{ConfigError, Result, StorageError, TallyError};
pub use model::{
    CountPatch, CountRecord, Group, GroupPatch, Member, MemberPatch, Memo, NewCount, NewGroup,
    NewMember, NewTicketType, TicketCategory, TicketType, TicketTypePatch,
};
pub use notify::{ChangeKind, ChangeNotifier, Observable, StoreChange, SubscriptionId};
pub use storage::{FileStorage, Gateway, InMemoryStorage, PersistWorker, Storage, StoreKey, WriteStats};
pub use store::{CountStore, GroupStore, MemberStore, MemoStore, TicketStore};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
