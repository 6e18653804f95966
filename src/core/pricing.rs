//! Elapsed time to fee
//!
//! Pricing is a pure function of the entry time, the exit time and the hourly
//! rate. Stays are billed per whole minute; partial minutes are free.

use crate::error::{ParkingError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Rate applied when none is configured, in currency units per hour
pub const DEFAULT_HOURLY_RATE: Decimal = dec!(10.00);

/// Fee and billed duration for one stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub fee: Decimal,
    pub parked_minutes: i64,
}

/// Hourly-rate pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    hourly_rate: Decimal,
}

impl PricingPolicy {
    /// Create a policy charging `hourly_rate` per hour
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidInput`] if the rate is negative.
    pub fn new(hourly_rate: Decimal) -> Result<Self> {
        if hourly_rate.is_sign_negative() && !hourly_rate.is_zero() {
            return Err(ParkingError::invalid_input("hourly_rate"));
        }
        Ok(Self { hourly_rate })
    }

    #[must_use]
    pub const fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    /// Price a stay from `entry` to `exit`
    ///
    /// An exit earlier than the entry (clock skew) is billed as zero time.
    #[must_use]
    pub fn compute_fee(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> FeeQuote {
        let elapsed_seconds = (exit - entry).num_seconds().max(0);
        self.fee_for_minutes(elapsed_seconds / 60)
    }

    /// Price a stay of a known number of whole minutes
    #[must_use]
    pub fn fee_for_minutes(&self, parked_minutes: i64) -> FeeQuote {
        let parked_minutes = parked_minutes.max(0);
        let fee = (Decimal::from(parked_minutes) * self.hourly_rate / dec!(60))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        FeeQuote {
            fee,
            parked_minutes,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }
}
