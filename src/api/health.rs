// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Whether real SOL disbursement is currently available.
    pub real_faucet: bool,
    pub uptime_seconds: u64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        real_faucet: state.solana.faucet_enabled(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testutil::test_state;

    #[tokio::test]
    async fn health_reports_ok_and_faucet_off() {
        let (state, _clock, _dir) = test_state();
        let Json(response) = health(State(state)).await;
        assert_eq!(response.status, "ok");
        assert!(!response.real_faucet);
    }
}
