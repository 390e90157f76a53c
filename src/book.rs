//! TallyBook - the five stores behind one handle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::{PersistenceBackend, TallyConfig};
use crate::error::Result;
use crate::model::{Group, Member, NewGroup, NewMember, NewTicketType, TicketCategory, TicketType};
use crate::storage::{FileStorage, Gateway, InMemoryStorage, PersistWorker, Storage, StoreKey, WriteStats};
use crate::store::{CountStore, GroupStore, MemberStore, MemoStore, TicketStore};

/// Catalog snapshot for external consumption. Count records and memos are
/// not included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub groups: Vec<Group>,
    pub members: Vec<Member>,
    pub tickets: Vec<TicketType>,
    pub export_date: DateTime<Utc>,
}

const SETUP_GROUP_COLOR: &str = "#E3F2FD";

/// Ticket types every new group starts with: name, category, price, color.
const DEFAULT_TICKETS: [(&str, TicketCategory, u32, &str); 4] = [
    ("チェキ券", TicketCategory::Cheki, 1000, "#BFDBFE"),
    ("写メ券", TicketCategory::Shamekai, 1500, "#FED7AA"),
    ("動画券", TicketCategory::Video, 2000, "#DDD6FE"),
    ("グッズ", TicketCategory::Goods, 500, "#FECACA"),
];

/// Ids created by [`TallyBook::setup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupIds {
    pub group_id: String,
    pub member_id: String,
    /// In sort order.
    pub ticket_ids: Vec<String>,
}

/// All stores of one tally, hydrated from one storage backend.
///
/// ## Example
///
/// ```ignore
/// let mut book = TallyBook::in_memory();
/// let group = book.groups_mut().add(NewGroup::new("IMMM", "#E3F2FD", 0));
/// let saya = book.members_mut().add(NewMember::new(&group, "Saya", "#FCE4EC", 0));
/// let cheki = book.tickets_mut().add(NewTicketType::new(Some(group.clone()), "Cheki", TicketCategory::Cheki, 2000, 0));
/// book.counts_mut().increment_count(&saya, &cheki, 2000);
///
/// let today = aggregate::records_for_date(book.counts(), date::today());
/// let total = aggregate::grand_total(&today, book.tickets());
/// ```
pub struct TallyBook {
    groups: GroupStore,
    members: MemberStore,
    tickets: TicketStore,
    counts: CountStore,
    memos: MemoStore,
    gateway: Gateway,
    worker: Option<PersistWorker>,
}

impl TallyBook {
    /// Open a book as described by `config`, creating the data directory if
    /// file persistence is selected.
    pub fn open(config: &TallyConfig) -> Result<Self> {
        let backend: Arc<dyn Storage> = match config.persistence {
            PersistenceBackend::File => Arc::new(FileStorage::open(&config.data_dir)?),
            PersistenceBackend::Memory => Arc::new(InMemoryStorage::new()),
        };
        info!(
            backend = ?config.persistence,
            data_dir = %config.data_dir.display(),
            background = config.background_writes,
            "opening tally book"
        );
        Ok(Self::with_storage(backend, config.background_writes))
    }

    /// An ephemeral book with inline writes.
    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(InMemoryStorage::new()), false)
    }

    /// Hydrate every store from `backend`.
    pub fn with_storage(backend: Arc<dyn Storage>, background_writes: bool) -> Self {
        let (gateway, worker) = if background_writes {
            let (gateway, worker) = Gateway::background(backend);
            (gateway, Some(worker))
        } else {
            (Gateway::inline(backend), None)
        };

        Self {
            groups: GroupStore::hydrate(gateway.clone()),
            members: MemberStore::hydrate(gateway.clone()),
            tickets: TicketStore::hydrate(gateway.clone()),
            counts: CountStore::hydrate(gateway.clone()),
            memos: MemoStore::hydrate(gateway.clone()),
            gateway,
            worker,
        }
    }

    pub fn groups(&self) -> &GroupStore {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut GroupStore {
        &mut self.groups
    }

    pub fn members(&self) -> &MemberStore {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut MemberStore {
        &mut self.members
    }

    pub fn tickets(&self) -> &TicketStore {
        &self.tickets
    }

    pub fn tickets_mut(&mut self) -> &mut TicketStore {
        &mut self.tickets
    }

    pub fn counts(&self) -> &CountStore {
        &self.counts
    }

    pub fn counts_mut(&mut self) -> &mut CountStore {
        &mut self.counts
    }

    pub fn memos(&self) -> &MemoStore {
        &self.memos
    }

    pub fn memos_mut(&mut self) -> &mut MemoStore {
        &mut self.memos
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// First-run setup: a group, a favorite member in it and the default
    /// ticket types bound to that group.
    ///
    /// Names are stored as given. On an empty book the new group and member
    /// become the selected ones.
    pub fn setup(
        &mut self,
        group_name: impl Into<String>,
        member_name: impl Into<String>,
        member_color: impl Into<String>,
    ) -> SetupIds {
        let group_id = self
            .groups
            .add(NewGroup::new(group_name, SETUP_GROUP_COLOR, 0));

        let mut member = NewMember::new(&group_id, member_name, member_color, 0);
        member.is_favorite = true;
        let member_id = self.members.add(member);

        let ticket_ids = DEFAULT_TICKETS
            .iter()
            .zip(0..)
            .map(|(&(name, category, price, color), sort_order)| {
                let mut ticket =
                    NewTicketType::new(Some(group_id.clone()), name, category, price, sort_order);
                ticket.color = color.to_string();
                self.tickets.add(ticket)
            })
            .collect();

        info!(group = %group_id, member = %member_id, "first-run setup complete");
        SetupIds {
            group_id,
            member_id,
            ticket_ids,
        }
    }

    /// Erase everything: empty every store in memory and remove all five
    /// storage keys.
    ///
    /// The removals are issued together but the backend does not make them
    /// atomic; a failure on one key is logged and the others still go.
    pub fn erase_all(&mut self) {
        self.groups.reset();
        self.members.reset();
        self.tickets.reset();
        self.counts.reset();
        self.memos.reset();
        self.gateway.remove_all(&StoreKey::ALL);
        info!("all tally data erased");
    }

    /// Snapshot groups, members and ticket types, each in display order.
    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            groups: self.groups.get_all().into_iter().cloned().collect(),
            members: self.members.get_all().into_iter().cloned().collect(),
            tickets: self.tickets.get_all().into_iter().cloned().collect(),
            export_date: Utc::now(),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Wait until queued writes have reached the backend.
    pub fn flush(&self) -> Result<()> {
        Ok(self.gateway.flush()?)
    }

    /// Stop the background writer after it has drained. Returns its
    /// statistics, or defaults for inline books.
    pub fn close(mut self) -> WriteStats {
        match self.worker.take() {
            Some(worker) => worker.stop(),
            None => WriteStats::default(),
        }
    }
}
