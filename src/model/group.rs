use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub color: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGroup {
    pub name: String,
    pub color: String,
    pub sort_order: i32,
}

impl NewGroup {
    pub fn new(name: impl Into<String>, color: impl Into<String>, sort_order: i32) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            sort_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub sort_order: Option<i32>,
}

impl Group {
    pub(crate) fn from_new(id: String, created_at: DateTime<Utc>, new: NewGroup) -> Self {
        Self {
            id,
            name: new.name,
            color: new.color,
            sort_order: new.sort_order,
            created_at,
        }
    }

    pub(crate) fn apply(&mut self, patch: GroupPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
    }
}
