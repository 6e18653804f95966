use crate::core::TicketLifecycleManager;
use std::sync::Arc;

/// State shared by all HTTP handlers
///
/// Cloned per request; the manager sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub manager: Arc<TicketLifecycleManager>,
}

impl AppState {
    #[must_use]
    pub fn new(manager: Arc<TicketLifecycleManager>) -> Self {
        Self { manager }
    }
}
