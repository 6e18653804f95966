use crate::config::Config;
use crate::core::{PricingPolicy, SystemClock, TicketLifecycleManager};
use crate::error::Result;
use crate::storage::open_store;
use std::sync::Arc;

/// Common context for handlers that touch tickets
pub struct HandlerContext {
    pub config: Config,
    pub manager: Arc<TicketLifecycleManager>,
}

impl HandlerContext {
    /// Open the configured store and build a manager over it
    pub async fn new(config: Config) -> Result<Self> {
        let manager = Arc::new(build_manager(&config).await?);
        Ok(Self { config, manager })
    }
}

/// Assemble a manager from configuration, using the system clock
pub async fn build_manager(config: &Config) -> Result<TicketLifecycleManager> {
    let store = open_store(&config.storage).await?;
    let pricing = PricingPolicy::new(config.pricing.hourly_rate)?;
    Ok(TicketLifecycleManager::new(store, Arc::new(SystemClock), pricing))
}
