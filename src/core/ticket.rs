use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of a parking ticket
///
/// Backed by a random (v4) UUID so ids are never sequential or guessable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Generate a fresh random id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight characters, for log lines
    #[must_use]
    pub fn short(&self) -> String {
        self.0.to_string().chars().take(8).collect()
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A vehicle's parking session
///
/// Tickets have no mutating methods: once issued, a ticket is only ever read
/// or deleted, so `entry_time` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub plate: String,
    pub parking_lot: String,
    pub entry_time: DateTime<Utc>,
}

impl Ticket {
    /// Issue a ticket with a fresh id
    #[must_use]
    pub fn new(plate: String, parking_lot: String, entry_time: DateTime<Utc>) -> Self {
        Self {
            id: TicketId::new(),
            plate,
            parking_lot,
            entry_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_ids_are_unique() {
        let a = TicketId::new();
        let b = TicketId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ticket_id_parse_and_display() {
        let id = TicketId::new();
        let parsed: TicketId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(id.short().len(), 8);
        assert!("123".parse::<TicketId>().is_err());
    }

    #[test]
    fn test_ticket_yaml_shape() {
        let ticket = Ticket::new("ABC123".to_string(), "LotA".to_string(), Utc::now());
        let yaml = serde_yaml::to_string(&ticket).unwrap();
        assert!(yaml.contains("plate: ABC123"));
        assert!(yaml.contains("parking_lot: LotA"));
        let back: Ticket = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, ticket);
    }
}
