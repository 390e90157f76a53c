use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked person ("oshi") whose purchases are tallied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    /// Owning group. Not checked against the group store.
    pub group_id: String,
    pub name: String,
    pub display_name: String,
    pub color: String,
    pub sort_order: i32,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewMember {
    pub group_id: String,
    pub name: String,
    pub display_name: String,
    pub color: String,
    pub sort_order: i32,
    pub is_favorite: bool,
}

impl NewMember {
    /// A non-favorite member whose display name equals its name.
    pub fn new(
        group_id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        sort_order: i32,
    ) -> Self {
        let name = name.into();
        Self {
            group_id: group_id.into(),
            display_name: name.clone(),
            name,
            color: color.into(),
            sort_order,
            is_favorite: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPatch {
    pub group_id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub color: Option<String>,
    pub sort_order: Option<i32>,
    pub is_favorite: Option<bool>,
}

impl Member {
    pub(crate) fn from_new(id: String, created_at: DateTime<Utc>, new: NewMember) -> Self {
        Self {
            id,
            group_id: new.group_id,
            name: new.name,
            display_name: new.display_name,
            color: new.color,
            sort_order: new.sort_order,
            is_favorite: new.is_favorite,
            created_at,
        }
    }

    pub(crate) fn apply(&mut self, patch: MemberPatch) {
        if let Some(group_id) = patch.group_id {
            self.group_id = group_id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(display_name) = patch.display_name {
            self.display_name = display_name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
    }
}
