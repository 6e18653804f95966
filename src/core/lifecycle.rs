//! Ticket lifecycle: entry and exit
//!
//! Per plate the lifecycle is `NONE -> PARKED -> NONE`. Entry issues a ticket
//! if the plate has none; exit prices the stay and deletes the ticket, and is
//! only reported as successful if this call is the one that removed it.
//!
//! Atomicity comes from the store. For stores whose insert is not a test-and-set
//! on the plate, entries for one plate and exits for one ticket are serialized
//! through process-local [`KeyedLocks`]; several processes sharing such a store
//! are not protected.

use super::{Clock, FeeQuote, PricingPolicy, Ticket, TicketId};
use crate::error::{ParkingError, Result};
use crate::storage::{KeyedLocks, StoreError, TicketStore};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of a redemption (or a quote)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitReceipt {
    #[serde(skip)]
    pub ticket_id: TicketId,
    pub plate: String,
    pub parking_lot: String,
    #[serde(rename = "parkedTimeMinutes")]
    pub parked_minutes: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub fee: Decimal,
}

impl ExitReceipt {
    fn new(ticket: Ticket, quote: FeeQuote) -> Self {
        Self {
            ticket_id: ticket.id,
            plate: ticket.plate,
            parking_lot: ticket.parking_lot,
            parked_minutes: quote.parked_minutes,
            fee: quote.fee,
        }
    }
}

#[derive(Debug, Default)]
struct LocalGuards {
    plates: KeyedLocks,
    tickets: KeyedLocks,
}

/// Issues and redeems tickets against a [`TicketStore`]
pub struct TicketLifecycleManager {
    store: Arc<dyn TicketStore>,
    clock: Arc<dyn Clock>,
    pricing: PricingPolicy,
    guards: Option<LocalGuards>,
}

impl std::fmt::Debug for TicketLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketLifecycleManager")
            .field("store", &self.store.backend_name())
            .field("pricing", &self.pricing)
            .field("local_guards", &self.guards.is_some())
            .finish_non_exhaustive()
    }
}

impl TicketLifecycleManager {
    pub fn new(store: Arc<dyn TicketStore>, clock: Arc<dyn Clock>, pricing: PricingPolicy) -> Self {
        let guards = if store.enforces_unique_plate() {
            None
        } else {
            warn!(
                "Store '{}' does not enforce unique plates; using process-local locks",
                store.backend_name()
            );
            Some(LocalGuards::default())
        };

        Self {
            store,
            clock,
            pricing,
            guards,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn TicketStore> {
        &self.store
    }

    #[must_use]
    pub const fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Issue a ticket for a vehicle entering `parking_lot`
    ///
    /// # Errors
    ///
    /// - [`ParkingError::InvalidInput`] if `plate` or `parking_lot` is blank
    /// - [`ParkingError::DuplicatePlate`] if the plate already has a live ticket
    /// - [`ParkingError::StoreUnavailable`] if the store fails
    pub async fn record_entry(&self, plate: &str, parking_lot: &str) -> Result<TicketId> {
        if plate.trim().is_empty() {
            return Err(ParkingError::invalid_input("plate"));
        }
        if parking_lot.trim().is_empty() {
            return Err(ParkingError::invalid_input("parkingLot"));
        }

        let _guard = match &self.guards {
            Some(guards) => Some(guards.plates.lock(plate).await),
            None => None,
        };

        if self
            .store
            .find_by_plate(plate)
            .await
            .map_err(|e| store_failure("find_by_plate", e))?
            .is_some()
        {
            warn!("Rejected entry for plate {}: already parked", plate);
            return Err(ParkingError::DuplicatePlate);
        }

        let ticket = Ticket::new(plate.to_string(), parking_lot.to_string(), self.clock.now());
        match self.store.insert(&ticket).await {
            Ok(()) => {},
            // A concurrent entry for the same plate won the race
            Err(StoreError::AlreadyExists) => {
                warn!("Rejected entry for plate {}: lost race to another entry", plate);
                return Err(ParkingError::DuplicatePlate);
            },
            Err(e) => return Err(store_failure("insert", e)),
        }

        info!(
            "Issued ticket {} for plate {} at {}",
            ticket.id.short(),
            ticket.plate,
            ticket.parking_lot
        );
        Ok(ticket.id)
    }

    /// Redeem a ticket: price the stay and delete the ticket
    ///
    /// # Errors
    ///
    /// - [`ParkingError::MissingTicketId`] if `ticket_id` is blank
    /// - [`ParkingError::InvalidTicketId`] if no live ticket has that id,
    ///   including when a concurrent exit redeemed it first
    /// - [`ParkingError::StoreUnavailable`] if the store fails
    pub async fn record_exit(&self, ticket_id: &str) -> Result<ExitReceipt> {
        let id = parse_ticket_id(ticket_id)?;

        let _guard = match &self.guards {
            Some(guards) => Some(guards.tickets.lock(&id.to_string()).await),
            None => None,
        };

        let (ticket, quote) = self.price_live_ticket(&id).await?;

        match self.store.delete_by_id(&id).await {
            Ok(()) => {},
            Err(StoreError::NotFound) => {
                warn!("Exit for ticket {} lost race to another exit", id.short());
                return Err(ParkingError::InvalidTicketId);
            },
            Err(e) => return Err(store_failure("delete_by_id", e)),
        }

        info!(
            "Redeemed ticket {} for plate {}: {} min, fee {}",
            id.short(),
            ticket.plate,
            quote.parked_minutes,
            quote.fee
        );
        Ok(ExitReceipt::new(ticket, quote))
    }

    /// Price a live ticket as of now without redeeming it
    ///
    /// # Errors
    ///
    /// Same as [`record_exit`](Self::record_exit).
    pub async fn quote(&self, ticket_id: &str) -> Result<ExitReceipt> {
        let id = parse_ticket_id(ticket_id)?;
        let (ticket, quote) = self.price_live_ticket(&id).await?;
        Ok(ExitReceipt::new(ticket, quote))
    }

    async fn price_live_ticket(&self, id: &TicketId) -> Result<(Ticket, FeeQuote)> {
        let ticket = self
            .store
            .get_by_id(id)
            .await
            .map_err(|e| store_failure("get_by_id", e))?
            .ok_or_else(|| {
                warn!("No live ticket {}", id.short());
                ParkingError::InvalidTicketId
            })?;

        let quote = self.pricing.compute_fee(ticket.entry_time, self.clock.now());
        Ok((ticket, quote))
    }
}

/// Parse a caller-supplied ticket id
///
/// A value that is not a UUID can never match a live ticket, so it is reported
/// as an invalid id rather than a separate kind of error.
fn parse_ticket_id(raw: &str) -> Result<TicketId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParkingError::MissingTicketId);
    }
    raw.parse().map_err(|_| {
        warn!("Malformed ticket id '{}'", raw);
        ParkingError::InvalidTicketId
    })
}

fn store_failure(operation: &str, err: StoreError) -> ParkingError {
    error!("Ticket store {} failed: {}", operation, err);
    ParkingError::from(err)
}
