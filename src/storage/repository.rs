use crate::core::{Ticket, TicketId};
use async_trait::async_trait;
use thiserror::Error;

/// Backend-level failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The ticket id (or, for plate-enforcing stores, the plate) is taken
    #[error("ticket already exists")]
    AlreadyExists,

    /// No ticket with that id
    #[error("ticket not found")]
    NotFound,

    /// The backend could not be reached or failed; carries its diagnostic
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage for live tickets
///
/// A ticket is live from a successful [`insert`](Self::insert) until a
/// successful [`delete_by_id`](Self::delete_by_id). Implementations must make
/// `delete_by_id` succeed for at most one of several concurrent callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Finds the live ticket for a plate
    async fn find_by_plate(&self, plate: &str) -> StoreResult<Option<Ticket>>;

    /// Inserts a new ticket
    ///
    /// Fails with [`StoreError::AlreadyExists`] instead of overwriting when the
    /// id is taken. Stores whose [`enforces_unique_plate`](Self::enforces_unique_plate)
    /// returns `true` also fail this way when the plate already has a live ticket.
    async fn insert(&self, ticket: &Ticket) -> StoreResult<()>;

    /// Loads a ticket by ID
    async fn get_by_id(&self, id: &TicketId) -> StoreResult<Option<Ticket>>;

    /// Deletes a ticket by ID, failing with [`StoreError::NotFound`] if absent
    async fn delete_by_id(&self, id: &TicketId) -> StoreResult<()>;

    /// Whether `insert` is an atomic test-and-set on the plate
    fn enforces_unique_plate(&self) -> bool;

    /// Short backend name for logs and health checks
    fn backend_name(&self) -> &'static str;
}
