use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Cheki,
    Shamekai,
    Video,
    Goods,
    Other,
}

impl TicketCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketCategory::Cheki => "cheki",
            TicketCategory::Shamekai => "shamekai",
            TicketCategory::Video => "video",
            TicketCategory::Goods => "goods",
            TicketCategory::Other => "other",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced, countable kind of purchase.
///
/// `is_active` hides a ticket type from pickers without touching the count
/// records that already reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: String,
    /// `None` for ticket types shared by every group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub name: String,
    pub category: TicketCategory,
    pub price: u32,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicketType {
    pub group_id: Option<String>,
    pub name: String,
    pub category: TicketCategory,
    pub price: u32,
    pub color: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

impl NewTicketType {
    /// An active ticket type without an icon.
    pub fn new(
        group_id: Option<String>,
        name: impl Into<String>,
        category: TicketCategory,
        price: u32,
        sort_order: i32,
    ) -> Self {
        Self {
            group_id,
            name: name.into(),
            category,
            price,
            color: String::new(),
            icon: None,
            sort_order,
            is_active: true,
        }
    }
}

/// Partial update for a ticket type. `group_id: Some(None)` detaches the
/// ticket type from its group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketTypePatch {
    pub group_id: Option<Option<String>>,
    pub name: Option<String>,
    pub category: Option<TicketCategory>,
    pub price: Option<u32>,
    pub color: Option<String>,
    pub icon: Option<Option<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl TicketType {
    pub(crate) fn from_new(id: String, created_at: DateTime<Utc>, new: NewTicketType) -> Self {
        Self {
            id,
            group_id: new.group_id,
            name: new.name,
            category: new.category,
            price: new.price,
            color: new.color,
            icon: new.icon,
            sort_order: new.sort_order,
            is_active: new.is_active,
            created_at,
        }
    }

    pub(crate) fn apply(&mut self, patch: TicketTypePatch) {
        if let Some(group_id) = patch.group_id {
            self.group_id = group_id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    pub fn belongs_to(&self, group_id: &str) -> bool {
        self.group_id.as_deref() == Some(group_id)
    }
}
