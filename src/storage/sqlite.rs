//! Ticket store backed by a SQLite table
//!
//! Uniqueness of both the ticket id and the plate is enforced by the table's
//! constraints, so `insert` is a conditional write on both keys.

use super::repository::{StoreError, StoreResult, TicketStore};
use crate::core::{Ticket, TicketBuilder, TicketId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS parking_tickets (
    ticket_id TEXT PRIMARY KEY NOT NULL,
    plate TEXT NOT NULL UNIQUE,
    parking_lot TEXT NOT NULL,
    entry_time TEXT NOT NULL
)";

type TicketRow = (String, String, String, DateTime<Utc>);

/// SQLite ticket store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url`, creating the database file and table if needed
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StoreError::unavailable)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StoreError::unavailable)?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(StoreError::unavailable)?;
        Ok(())
    }

    fn row_to_ticket(row: TicketRow) -> StoreResult<Ticket> {
        let (id, plate, parking_lot, entry_time) = row;
        let id = TicketId::from_str(&id)
            .map_err(|e| StoreError::Unavailable(format!("corrupt ticket id '{id}': {e}")))?;
        Ok(TicketBuilder::new()
            .id(id)
            .plate(plate)
            .parking_lot(parking_lot)
            .entry_time(entry_time)
            .build())
    }
}

#[async_trait]
impl TicketStore for SqliteStore {
    async fn find_by_plate(&self, plate: &str) -> StoreResult<Option<Ticket>> {
        let row: Option<TicketRow> = sqlx::query_as(
            "SELECT ticket_id, plate, parking_lot, entry_time FROM parking_tickets WHERE plate = ?",
        )
        .bind(plate)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::unavailable)?;
        row.map(Self::row_to_ticket).transpose()
    }

    async fn insert(&self, ticket: &Ticket) -> StoreResult<()> {
        let result = sqlx::query(
            "INSERT INTO parking_tickets (ticket_id, plate, parking_lot, entry_time) VALUES (?, ?, ?, ?)",
        )
        .bind(ticket.id.to_string())
        .bind(&ticket.plate)
        .bind(&ticket.parking_lot)
        .bind(ticket.entry_time)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!("Inserted ticket {} into sqlite", ticket.id.short());
                Ok(())
            },
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::AlreadyExists)
            },
            Err(e) => Err(StoreError::unavailable(e)),
        }
    }

    async fn get_by_id(&self, id: &TicketId) -> StoreResult<Option<Ticket>> {
        let row: Option<TicketRow> = sqlx::query_as(
            "SELECT ticket_id, plate, parking_lot, entry_time FROM parking_tickets WHERE ticket_id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::unavailable)?;
        row.map(Self::row_to_ticket).transpose()
    }

    async fn delete_by_id(&self, id: &TicketId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM parking_tickets WHERE ticket_id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StoreError::unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn enforces_unique_plate(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
