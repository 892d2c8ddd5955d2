//! HTTP API response DTOs.

use serde::Serialize;

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}

/// Response of `GET /api/connections`.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatsDto {
    pub active_connections: usize,
}
