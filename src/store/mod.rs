//! Entity stores.
//!
//! Group, member, ticket-type and count stores share one generic
//! [`Collection`]; the memo store is keyed by day and stands on its own.
//! All stores apply mutations synchronously in memory, then hand a full
//! snapshot to their [`Gateway`](crate::storage::Gateway) and notify
//! subscribers.

mod collection;
mod count;
mod cursor;
mod group;
mod member;
mod memo;
mod ticket;

pub use collection::{Collection, Record};
pub use count::CountStore;
pub use cursor::Cursor;
pub use group::GroupStore;
pub use member::MemberStore;
pub use memo::MemoStore;
pub use ticket::TicketStore;
