/// Selection cursor layered over a store: which entity is "current".
///
/// The first entity added to an empty store becomes selected, and deleting
/// the selected entity clears the cursor. Explicit selection is not checked
/// against the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    selected: Option<String>,
}

impl Cursor {
    pub fn restore(selected: Option<String>) -> Self {
        Self { selected }
    }

    pub fn get(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Returns true if the cursor moved.
    pub(crate) fn on_insert(&mut self, was_empty: bool, id: &str) -> bool {
        if was_empty {
            self.selected = Some(id.to_string());
        }
        was_empty
    }

    /// Returns true if the cursor was cleared.
    pub(crate) fn on_remove(&mut self, id: &str) -> bool {
        if self.get() == Some(id) {
            self.selected = None;
            return true;
        }
        false
    }
}
