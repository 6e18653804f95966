//! Integration tests for the ticket lifecycle
//!
//! Runs entry/exit scenarios through the public API against the memory and
//! file backends.

use chrono::{Duration, TimeZone, Utc};
use parking_ticket::ParkingError;
use parking_ticket::core::{ManualClock, PricingPolicy, TicketLifecycleManager};
use parking_ticket::storage::{FileStore, MemoryStore, TicketStore};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::TempDir;

fn manager_over(store: Arc<dyn TicketStore>) -> (TicketLifecycleManager, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 5, 13, 10, 0, 0).unwrap(),
    ));
    let manager = TicketLifecycleManager::new(store, clock.clone(), PricingPolicy::default());
    (manager, clock)
}

async fn file_store(temp_dir: &TempDir) -> Arc<dyn TicketStore> {
    let store = FileStore::new(temp_dir.path().join(".parking-ticket"));
    store.ensure_directories().await.unwrap();
    Arc::new(store)
}

async fn run_scenario(store: Arc<dyn TicketStore>) {
    let (manager, clock) = manager_over(store);

    let t1 = manager.record_entry("ABC123", "LotA").await.unwrap();
    let err = manager.record_entry("ABC123", "LotB").await.unwrap_err();
    assert!(matches!(err, ParkingError::DuplicatePlate));

    clock.advance(Duration::minutes(90));
    let receipt = manager.record_exit(&t1.to_string()).await.unwrap();
    assert_eq!(receipt.plate, "ABC123");
    assert_eq!(receipt.parking_lot, "LotA");
    assert_eq!(receipt.parked_minutes, 90);
    assert_eq!(receipt.fee, dec!(15.00));

    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "plate": "ABC123",
            "parkingLot": "LotA",
            "parkedTimeMinutes": 90,
            "fee": 15.0
        })
    );

    let err = manager.record_exit(&t1.to_string()).await.unwrap_err();
    assert!(matches!(err, ParkingError::InvalidTicketId));

    let t2 = manager.record_entry("ABC123", "LotA").await.unwrap();
    assert_ne!(t1, t2);
}

#[tokio::test]
async fn test_end_to_end_memory() {
    run_scenario(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn test_end_to_end_file() {
    let temp_dir = TempDir::new().unwrap();
    run_scenario(file_store(&temp_dir).await).await;
}

#[tokio::test]
async fn test_two_hour_stay() {
    let (manager, clock) = manager_over(Arc::new(MemoryStore::new()));
    let id = manager.record_entry("XYZ789", "LotC").await.unwrap();
    clock.advance(Duration::hours(2));

    let receipt = manager.record_exit(&id.to_string()).await.unwrap();
    assert_eq!(receipt.parked_minutes, 120);
    assert_eq!(receipt.fee, dec!(20.00));
}

#[tokio::test]
async fn test_short_stay_is_free() {
    let (manager, clock) = manager_over(Arc::new(MemoryStore::new()));
    let id = manager.record_entry("XYZ789", "LotC").await.unwrap();
    clock.advance(Duration::seconds(59));

    let receipt = manager.record_exit(&id.to_string()).await.unwrap();
    assert_eq!(receipt.parked_minutes, 0);
    assert_eq!(receipt.fee, dec!(0.00));
}

#[tokio::test]
async fn test_many_plates_are_independent() {
    let (manager, clock) = manager_over(Arc::new(MemoryStore::new()));

    let mut ids = Vec::new();
    for i in 0..10 {
        ids.push(manager.record_entry(&format!("PLATE{i}"), "LotA").await.unwrap());
    }
    clock.advance(Duration::minutes(6));

    for id in ids.iter().rev() {
        let receipt = manager.record_exit(&id.to_string()).await.unwrap();
        assert_eq!(receipt.fee, dec!(1.00));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_entries_single_winner_per_plate() {
    let temp_dir = TempDir::new().unwrap();
    for store in [
        Arc::new(MemoryStore::new()) as Arc<dyn TicketStore>,
        file_store(&temp_dir).await,
    ] {
        let (manager, _clock) = manager_over(store);
        let manager = Arc::new(manager);

        let handles: Vec<_> = (0..12)
            .map(|i| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.record_entry("RACE1", &format!("Lot{i}")).await })
            })
            .collect();

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(e) => assert!(matches!(e, ParkingError::DuplicatePlate), "got {e:?}"),
            }
        }
        assert_eq!(wins, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_exits_single_receipt() {
    let temp_dir = TempDir::new().unwrap();
    for store in [
        Arc::new(MemoryStore::new()) as Arc<dyn TicketStore>,
        file_store(&temp_dir).await,
    ] {
        let (manager, _clock) = manager_over(store);
        let manager = Arc::new(manager);
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
                Err(e) => assert!(matches!(e, ParkingError::InvalidTicketId), "got {e:?}"),
            }
        }
        assert_eq!(receipts, 1);
    }
}

#[tokio::test]
async fn test_long_plate_on_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let (manager, clock) = manager_over(file_store(&temp_dir).await);
    let plate = "A".repeat(220);

    let id = manager.record_entry(&plate, "LotA").await.unwrap();
    let err = manager.record_entry(&plate, "LotB").await.unwrap_err();
    assert!(matches!(err, ParkingError::DuplicatePlate));

    clock.advance(Duration::minutes(30));
    let receipt = manager.record_exit(&id.to_string()).await.unwrap();
    assert_eq!(receipt.plate, plate);
    assert_eq!(receipt.fee, dec!(5.00));
}
