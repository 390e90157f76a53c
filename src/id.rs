//! Identifier generation for new entities.
//!
//! Ids look like `member_1718000000000_k3j9x0q2a`: a kind prefix, the
//! creation time in epoch milliseconds and a random base-36 suffix. No check
//! against existing collections is made.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The entity kinds that receive generated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Group,
    Member,
    Ticket,
    Record,
}

impl EntityKind {
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Group => "group",
            EntityKind::Member => "member",
            EntityKind::Ticket => "ticket",
            EntityKind::Record => "record",
        }
    }
}

/// Generate a fresh id for an entity of the given kind.
pub fn new_id(kind: EntityKind) -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}_{}_{}", kind.prefix(), millis, suffix)
}
