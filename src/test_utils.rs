//! Test utilities for parking-ticket
//!
//! Common fixtures shared by the unit tests: a ready-made lot with a
//! controllable clock, ticket constructors, and a store double that behaves
//! like a plain scan-then-write table.

#![cfg(test)]

use crate::core::{ManualClock, PricingPolicy, Ticket, TicketBuilder, TicketId, TicketLifecycleManager};
use crate::storage::{MemoryStore, StoreError, StoreResult, TicketStore};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fixed instant tests start from
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 13, 10, 0, 0).unwrap()
}

/// Test fixture: a manager over an in-memory store with a manual clock
pub struct TestLot {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub manager: TicketLifecycleManager,
}

impl TestLot {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(test_time()));
        let manager = TicketLifecycleManager::new(
            store.clone(),
            clock.clone(),
            PricingPolicy::default(),
        );
        Self {
            store,
            clock,
            manager,
        }
    }
}

/// Create a ticket entered at [`test_time`]
pub fn create_test_ticket(plate: &str, parking_lot: &str) -> Ticket {
    TicketBuilder::new()
        .id(TicketId::new())
        .plate(plate)
        .parking_lot(parking_lot)
        .entry_time(test_time())
        .build()
}

/// Store double without a plate constraint
///
/// `insert` only rejects duplicate ids and `find_by_plate` yields before
/// answering, which leaves room for two entries to interleave.
#[derive(Debug, Default)]
pub struct ScanningStore {
    tickets: Mutex<HashMap<TicketId, Ticket>>,
}

impl ScanningStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_plate(&self, plate: &str) -> usize {
        self.tickets
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.plate == plate)
            .count()
    }
}

#[async_trait]
impl TicketStore for ScanningStore {
    async fn find_by_plate(&self, plate: &str) -> StoreResult<Option<Ticket>> {
        tokio::task::yield_now().await;
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets.values().find(|t| t.plate == plate).cloned())
    }

    async fn insert(&self, ticket: &Ticket) -> StoreResult<()> {
        tokio::task::yield_now().await;
        let mut tickets = self.tickets.lock().unwrap();
        if tickets.contains_key(&ticket.id) {
            return Err(StoreError::AlreadyExists);
        }
        tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &TicketId) -> StoreResult<Option<Ticket>> {
        tokio::task::yield_now().await;
        Ok(self.tickets.lock().unwrap().get(id).cloned())
    }

    async fn delete_by_id(&self, id: &TicketId) -> StoreResult<()> {
        tokio::task::yield_now().await;
        self.tickets
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    fn enforces_unique_plate(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "scanning"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParkingError;

    #[test]
    fn test_lot_starts_empty() {
        let lot = TestLot::new();
        assert!(lot.store.is_empty());
        assert_eq!(lot.manager.store().backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_scanning_store_accepts_duplicate_plates() {
        let store = ScanningStore::new();
        store.insert(&create_test_ticket("ABC123", "LotA")).await.unwrap();
        store.insert(&create_test_ticket("ABC123", "LotB")).await.unwrap();
        assert_eq!(store.count_plate("ABC123"), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_local_guards_serialize_same_plate_entries() {
        let store = Arc::new(ScanningStore::new());
        let manager = Arc::new(TicketLifecycleManager::new(
            store.clone(),
            Arc::new(ManualClock::new(test_time())),
            PricingPolicy::default(),
        ));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.record_entry("RACE1", &format!("Lot{i}")).await })
            })
            .collect();

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(e) => assert!(matches!(e, ParkingError::DuplicatePlate)),
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.count_plate("RACE1"), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_local_guards_serialize_same_ticket_exits() {
        let store = Arc::new(ScanningStore::new());
        let manager = Arc::new(TicketLifecycleManager::new(
            store,
            Arc::new(ManualClock::new(test_time())),
            PricingPolicy::default(),
        ));
        let id = manager.record_entry("ABC123", "LotA").await.unwrap().to_string();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                let id = id.clone();
                tokio::spawn(async move { manager.record_exit(&id).await })
            })
            .collect();

        let mut receipts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => receipts += 1,
                Err(e) => assert!(matches!(e, ParkingError::InvalidTicketId)),
            }
        }
        assert_eq!(receipts, 1);
    }
}
