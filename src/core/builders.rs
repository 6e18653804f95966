use super::{Ticket, TicketId};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// Mainly used by stores when rehydrating rows and by tests that need a ticket
/// with a specific id or entry time.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    plate: Option<String>,
    parking_lot: Option<String>,
    entry_time: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub const fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the plate
    #[must_use]
    pub fn plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = Some(plate.into());
        self
    }

    /// Set the parking lot
    #[must_use]
    pub fn parking_lot(mut self, parking_lot: impl Into<String>) -> Self {
        self.parking_lot = Some(parking_lot.into());
        self
    }

    /// Set `entry_time`
    #[must_use]
    pub const fn entry_time(mut self, entry_time: DateTime<Utc>) -> Self {
        self.entry_time = Some(entry_time);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        Ticket {
            id: self.id.unwrap_or_default(),
            plate: self.plate.unwrap_or_default(),
            parking_lot: self.parking_lot.unwrap_or_default(),
            entry_time: self.entry_time.unwrap_or_else(Utc::now),
        }
    }
}
