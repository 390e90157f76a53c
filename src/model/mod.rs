//! Entity types persisted by the stores.
//!
//! Every entity comes with a `New*` input (the fields a caller supplies on
//! creation) and a `*Patch` of optional fields for shallow partial updates.
//! A `None` field in a patch keeps the current value.

mod count;
mod group;
mod member;
mod memo;
mod ticket;

pub use count::{CountPatch, CountRecord, NewCount};
pub use group::{Group, GroupPatch, NewGroup};
pub use member::{Member, MemberPatch, NewMember};
pub use memo::Memo;
pub use ticket::{NewTicketType, TicketCategory, TicketType, TicketTypePatch};
