//! Entry, exit, quote and health endpoints
//!
//! - `POST /entry?plate=&parkingLot=`
//! - `POST /exit?ticketId=`
//! - `GET /tickets/:ticket_id`
//! - `GET /health`
//!
//! Missing and empty query parameters are treated the same way. When a
//! parameter is repeated, the first occurrence is used.

use super::error::ApiError;
use super::state::AppState;
use crate::core::ExitReceipt;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

/// Raw query string pairs, in request order
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// First value of `name`, or `""` when absent
    #[must_use]
    pub fn first(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map_or("", |(_, value)| value.as_str())
    }
}

/// Response of `POST /entry`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub ticket_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub version: &'static str,
}

/// Record a vehicle entering a lot
pub async fn entry(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<EntryResponse>, ApiError> {
    let Query(params) = params?;
    let ticket_id = state
        .manager
        .record_entry(params.first("plate"), params.first("parkingLot"))
        .await?;
    Ok(Json(EntryResponse {
        ticket_id: ticket_id.to_string(),
    }))
}

/// Record a vehicle leaving and charge for the stay
pub async fn exit(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<ExitReceipt>, ApiError> {
    let Query(params) = params?;
    let receipt = state.manager.record_exit(params.first("ticketId")).await?;
    Ok(Json(receipt))
}

/// Current fee of a live ticket, without redeeming it
pub async fn quote(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<ExitReceipt>, ApiError> {
    let receipt = state.manager.quote(&ticket_id).await?;
    Ok(Json(receipt))
}

/// Liveness check
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.manager.store().backend_name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
