//! parking-ticket - Parking lot ticket issuing and redemption
//!
//! This crate issues a ticket when a vehicle enters a lot and redeems it on
//! exit, charging for the time parked:
//! - At most one live ticket per plate, across all lots
//! - Each ticket can be redeemed exactly once, even under concurrent exits
//! - Fees are billed per whole minute at a configurable hourly rate
//! - Pluggable storage: in-memory, on-disk files, or SQLite (`database` feature)
//! - HTTP service (`api` feature) and a CLI front-end

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::items_after_statements)]

//! # Concurrent Safety
//!
//! Two entries for the same plate, or two exits for the same ticket, resolve
//! with exactly one success. The stores provide this with conditional writes;
//! for stores that cannot, the manager falls back to process-local locks.
//!
//! # Example
//!
//! ```rust,ignore
//! use parking_ticket::core::{PricingPolicy, SystemClock, TicketLifecycleManager};
//! use parking_ticket::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let manager = TicketLifecycleManager::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(SystemClock),
//!     PricingPolicy::default(),
//! );
//!
//! let ticket_id = manager.record_entry("ABC123", "LotA").await?;
//! let receipt = manager.record_exit(&ticket_id.to_string()).await?;
//! println!("{} owes {}", receipt.plate, receipt.fee);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{ParkingError, Result};
