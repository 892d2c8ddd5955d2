//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ConnectionStatsDto, HealthDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}

/// Number of connections currently registered for broadcasts
pub async fn get_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionStatsDto> {
    Json(ConnectionStatsDto {
        active_connections: state.registry.len(),
    })
}
