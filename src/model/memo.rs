use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Free-text note for one calendar day. The day is the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub date: NaiveDate,
    pub content: String,
}
