//! In-memory authoritative collection for one resource.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::entity::Entity;
use crate::types::Pagination;

/// List state shared between the command in the foreground and the
/// auto-refresh task
pub type SharedList<T> = Arc<RwLock<ListState<T>>>;

pub fn shared<T: Entity>() -> SharedList<T> {
    Arc::new(RwLock::new(ListState::new()))
}

/// Holds the records for one resource plus the pagination metadata the
/// server reported for them.
///
/// `generation` is the sequence number of the last applied fetch. A
/// fetch response tagged with an older sequence number is discarded, so
/// an overlapping manual refresh and auto-refresh tick cannot overwrite
/// newer data with a slower, staler response.
#[derive(Debug, Default)]
pub struct ListState<T> {
    items: Vec<T>,
    pagination: Pagination,
    generation: u64,
}

impl<T: Entity> ListState<T> {
    pub fn new() -> Self {
        ListState {
            items: Vec::new(),
            pagination: Pagination::default(),
            generation: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replace the whole collection from a fetch tagged `seq`.
    ///
    /// Returns false (and leaves state untouched) when the response is
    /// stale, i.e. a newer fetch already landed.
    pub fn apply_snapshot(
        &mut self,
        seq: u64,
        items: Vec<T>,
        total: Option<u64>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> bool {
        if seq <= self.generation {
            tracing::debug!(seq, generation = self.generation, "discarding stale fetch");
            return false;
        }
        self.pagination.total = total.unwrap_or(items.len() as u64);
        if let Some(page) = page {
            self.pagination.current = page;
        }
        if let Some(page_size) = page_size {
            self.pagination.page_size = page_size;
        }
        self.items = items;
        self.generation = seq;
        true
    }

    /// Seed the collection locally (snapshot fallback), without touching
    /// the generation counter
    pub fn load_local(&mut self, items: Vec<T>) {
        self.pagination.total = items.len() as u64;
        self.items = items;
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.pagination.total = self.pagination.total.saturating_add(1);
    }

    /// Wholesale record replace by identity. Returns false when no
    /// record with that id exists.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|i| i.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove by identity. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        self.pagination.total = self.pagination.total.saturating_sub(1);
        Some(self.items.remove(index))
    }

    pub fn clone_items(&self) -> Vec<T> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{AuditEvent, StaffUser};

    fn user(id: &str, name: &str) -> StaffUser {
        StaffUser {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@hospital.local", id),
            role: "Doctor".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_snapshot_replaces_wholesale() {
        let mut state: ListState<StaffUser> = ListState::new();
        state.apply_snapshot(1, vec![user("a", "A"), user("b", "B")], None, None, None);
        assert_eq!(state.len(), 2);

        // The refresh returns [A, C]; B must be gone, not merged
        state.apply_snapshot(2, vec![user("a", "A"), user("c", "C")], None, None, None);
        let ids: Vec<&str> = state.items().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_stale_snapshot_is_discarded() {
        let mut state: ListState<StaffUser> = ListState::new();
        assert!(state.apply_snapshot(5, vec![user("a", "A")], None, None, None));
        assert!(!state.apply_snapshot(3, vec![user("z", "Z")], None, None, None));
        assert_eq!(state.items()[0].id, "a");
        assert_eq!(state.generation(), 5);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut state: ListState<StaffUser> = ListState::new();
        state.apply_snapshot(1, vec![user("a", "A")], None, None, None);
        assert!(state.remove("missing").is_none());
        assert_eq!(state.len(), 1);
        assert_eq!(state.pagination().total, 1);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut state: ListState<StaffUser> = ListState::new();
        state.apply_snapshot(1, vec![user("a", "A")], None, None, None);
        let mut updated = user("a", "A2");
        updated.role = "Admin".to_string();
        assert!(state.replace(updated));
        assert_eq!(state.get("a").unwrap().name, "A2");
        assert_eq!(state.get("a").unwrap().role, "Admin");
    }

    #[test]
    fn test_total_tracks_server_value() {
        let mut state: ListState<AuditEvent> = ListState::new();
        state.apply_snapshot(1, Vec::new(), Some(120), Some(3), Some(20));
        assert_eq!(state.pagination().total, 120);
        assert_eq!(state.pagination().current, 3);
    }
}
