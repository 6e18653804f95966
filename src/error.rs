//! Error types for parking-ticket
//!
//! [`ParkingError`] is the tagged result every lifecycle operation returns.
//! Client-side failures (bad input, duplicate plate, unknown ticket) are kept
//! apart from server-side failures so transports can map them to status codes.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ParkingError>;

/// Errors produced by the ticket lifecycle and its surroundings
#[derive(Error, Debug)]
pub enum ParkingError {
    /// A required input was missing or empty
    #[error("Missing {field} parameter")]
    InvalidInput { field: String },

    /// A live ticket already exists for the plate
    #[error("Plate already exists")]
    DuplicatePlate,

    /// Exit was requested without a ticket id
    #[error("Missing ticketId")]
    MissingTicketId,

    /// The ticket id does not match a live ticket
    #[error("Invalid ticketId")]
    InvalidTicketId,

    /// The backing store failed; carries the backend diagnostic
    #[error("{0}")]
    StoreUnavailable(String),

    /// Configuration could not be loaded or was invalid
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ParkingError {
    /// Create an invalid-input error for the named field
    pub fn invalid_input(field: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
        }
    }

    /// Whether the failure was caused by the caller rather than the service
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::DuplicatePlate
                | Self::MissingTicketId
                | Self::InvalidTicketId
        )
    }

    /// Whether retrying the same request later might succeed
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Io(_))
    }

    /// Whether this is a configuration problem
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Message shown to callers
    ///
    /// This is the exact string placed in the `error` field of HTTP responses.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Hints for CLI users on how to recover
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { field } => {
                vec![format!("Provide a non-empty value for '{field}'")]
            },
            Self::DuplicatePlate => vec![
                "The vehicle is already parked; exit its current ticket first".to_string(),
            ],
            Self::MissingTicketId => vec!["Pass the ticket id printed at entry".to_string()],
            Self::InvalidTicketId => vec![
                "Check the ticket id for typos".to_string(),
                "The ticket may already have been redeemed".to_string(),
            ],
            Self::StoreUnavailable(_) => vec![
                "Check that the storage backend is reachable".to_string(),
                "Run 'parking-ticket config show' to inspect storage settings".to_string(),
            ],
            Self::Config(_) => vec!["Check the configuration file and PARKING_* variables".to_string()],
            Self::Io(_) | Self::Serialization(_) => vec![],
        }
    }
}

impl From<serde_json::Error> for ParkingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ParkingError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
