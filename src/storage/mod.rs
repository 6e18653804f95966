//! Ticket storage backends
//!
//! All backends implement [`TicketStore`]. The memory and file backends are
//! always available; the sqlite backend needs the `database` feature.

mod file;
mod guard;
mod memory;
mod repository;
#[cfg(feature = "database")]
mod sqlite;

pub use file::FileStore;
pub use guard::{KeyedGuard, KeyedLocks};
pub use memory::MemoryStore;
pub use repository::{StoreError, StoreResult, TicketStore};
#[cfg(feature = "database")]
pub use sqlite::SqliteStore;

#[cfg(test)]
pub use repository::MockTicketStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{ParkingError, Result};
use std::sync::Arc;
use tracing::info;

/// Open the store selected by the configuration
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn TicketStore>> {
    let store: Arc<dyn TicketStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => {
            let store = FileStore::new(&config.path);
            store.ensure_directories().await?;
            Arc::new(store)
        },
        #[cfg(feature = "database")]
        StorageBackend::Sqlite => Arc::new(SqliteStore::connect(&config.database_url).await?),
        #[cfg(not(feature = "database"))]
        StorageBackend::Sqlite => {
            return Err(ParkingError::Config(
                "the sqlite backend requires the 'database' feature".to_string(),
            ));
        },
    };

    info!("Opened {} ticket store", store.backend_name());
    Ok(store)
}

impl From<StoreError> for ParkingError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
