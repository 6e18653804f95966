//! In-process ticket store

use super::repository::{StoreError, StoreResult, TicketStore};
use crate::core::{Ticket, TicketId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct Tables {
    by_id: HashMap<TicketId, Ticket>,
    by_plate: HashMap<String, TicketId>,
}

/// Ticket store held in memory
///
/// Both indexes live behind one lock, so the plate check and the write in
/// [`insert`](TicketStore::insert) happen as a single step.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tickets
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn find_by_plate(&self, plate: &str) -> StoreResult<Option<Ticket>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables
            .by_plate
            .get(plate)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn insert(&self, ticket: &Ticket) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if tables.by_id.contains_key(&ticket.id) || tables.by_plate.contains_key(&ticket.plate) {
            return Err(StoreError::AlreadyExists);
        }
        tables.by_plate.insert(ticket.plate.clone(), ticket.id);
        tables.by_id.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &TicketId) -> StoreResult<Option<Ticket>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables.by_id.get(id).cloned())
    }

    async fn delete_by_id(&self, id: &TicketId) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let ticket = tables.by_id.remove(id).ok_or(StoreError::NotFound)?;
        tables.by_plate.remove(&ticket.plate);
        Ok(())
    }

    fn enforces_unique_plate(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_ticket;

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let store = MemoryStore::new();
        let ticket = create_test_ticket("ABC123", "LotA");

        store.insert(&ticket).await.unwrap();

        assert_eq!(store.get_by_id(&ticket.id).await.unwrap(), Some(ticket.clone()));
        assert_eq!(store.find_by_plate("ABC123").await.unwrap(), Some(ticket));
        assert_eq!(store.find_by_plate("abc123").await.unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_same_id() {
        let store = MemoryStore::new();
        let ticket = create_test_ticket("ABC123", "LotA");
        store.insert(&ticket).await.unwrap();

        let mut clash = ticket.clone();
        clash.plate = "OTHER".to_string();
        assert_eq!(store.insert(&clash).await, Err(StoreError::AlreadyExists));
        assert_eq!(store.find_by_plate("OTHER").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_rejects_same_plate() {
        let store = MemoryStore::new();
        store.insert(&create_test_ticket("ABC123", "LotA")).await.unwrap();

        let result = store.insert(&create_test_ticket("ABC123", "LotB")).await;
        assert_eq!(result, Err(StoreError::AlreadyExists));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_frees_plate() {
        let store = MemoryStore::new();
        let ticket = create_test_ticket("ABC123", "LotA");
        store.insert(&ticket).await.unwrap();

        store.delete_by_id(&ticket.id).await.unwrap();
        assert!(store.is_empty());
        assert_eq!(store.find_by_plate("ABC123").await.unwrap(), None);
        assert_eq!(store.delete_by_id(&ticket.id).await, Err(StoreError::NotFound));

        store.insert(&create_test_ticket("ABC123", "LotA")).await.unwrap();
    }
}
