//! Core domain types and the ticket lifecycle
//!
//! - [`Ticket`] and [`TicketId`]: the parking session record
//! - [`Clock`]: injected time source
//! - [`PricingPolicy`]: elapsed time to fee
//! - [`TicketLifecycleManager`]: entry and exit orchestration

mod builders;
mod clock;
mod lifecycle;
mod pricing;
mod ticket;

pub use builders::TicketBuilder;
pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use lifecycle::{ExitReceipt, TicketLifecycleManager};
pub use pricing::{DEFAULT_HOURLY_RATE, FeeQuote, PricingPolicy};
pub use ticket::{Ticket, TicketId};
