// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User-facing withdrawal requests. Both kinds land in the pending
//! queue for admin adjudication.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{auth::Caller, error::ApiError, solana, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PointsWithdrawalRequest {
    pub amount: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SolWithdrawalRequest {
    pub amount: f64,
    pub destination: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawalCreatedResponse {
    pub request_id: String,
}

/// Request a points withdrawal; the amount is reserved immediately.
#[utoipa::path(
    post,
    path = "/v1/withdrawals/points",
    tag = "Withdrawals",
    request_body = PointsWithdrawalRequest,
    responses(
        (status = 200, body = WithdrawalCreatedResponse),
        (status = 422, description = "Insufficient balance")
    )
)]
pub async fn request_points_withdrawal(
    Caller(caller_id): Caller,
    State(state): State<AppState>,
    Json(request): Json<PointsWithdrawalRequest>,
) -> Result<Json<WithdrawalCreatedResponse>, ApiError> {
    state.ledger.ensure_account(&caller_id).await?;
    let request_id = state
        .ledger
        .request_points_withdrawal(&caller_id, request.amount)
        .await?;
    Ok(Json(WithdrawalCreatedResponse { request_id }))
}

/// Request a SOL withdrawal to an external address. No points are
/// debited; the admin decision is recorded separately from any actual
/// transfer.
#[utoipa::path(
    post,
    path = "/v1/withdrawals/sol",
    tag = "Withdrawals",
    request_body = SolWithdrawalRequest,
    responses(
        (status = 200, body = WithdrawalCreatedResponse),
        (status = 400, description = "Invalid amount or address")
    )
)]
pub async fn request_sol_withdrawal(
    Caller(caller_id): Caller,
    State(state): State<AppState>,
    Json(request): Json<SolWithdrawalRequest>,
) -> Result<Json<WithdrawalCreatedResponse>, ApiError> {
    solana::validate_address(&request.destination)?;

    state.ledger.ensure_account(&caller_id).await?;
    let request_id = state
        .ledger
        .request_sol_withdrawal(&caller_id, request.amount, &request.destination)
        .await?;
    Ok(Json(WithdrawalCreatedResponse { request_id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testutil::test_state;
    use axum::http::StatusCode;

    const DEST: &str = "11111111111111111111111111111111";

    fn caller(id: &str) -> Caller {
        Caller(id.to_string())
    }

    #[tokio::test]
    async fn points_withdrawal_without_funds_is_unprocessable() {
        let (state, _clock, _dir) = test_state();

        let err = request_points_withdrawal(
            caller("u1"),
            State(state),
            Json(PointsWithdrawalRequest { amount: 5 }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn points_withdrawal_reserves_balance() {
        let (state, _clock, _dir) = test_state();
        state.ledger.set_points("u1", 50).await.unwrap();

        let Json(created) = request_points_withdrawal(
            caller("u1"),
            State(state.clone()),
            Json(PointsWithdrawalRequest { amount: 20 }),
        )
        .await
        .unwrap();
        assert!(!created.request_id.is_empty());
        assert_eq!(state.ledger.account_view("u1").await.unwrap().points, 30);
    }

    #[tokio::test]
    async fn sol_withdrawal_rejects_malformed_address() {
        let (state, _clock, _dir) = test_state();

        let err = request_sol_withdrawal(
            caller("u1"),
            State(state.clone()),
            Json(SolWithdrawalRequest {
                amount: 0.1,
                destination: "definitely-not-base58!".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        // Nothing was created for the rejected request.
        assert!(state.ledger.list_all_withdrawals().await.is_empty());
    }

    #[tokio::test]
    async fn sol_withdrawal_creates_pending_request() {
        let (state, _clock, _dir) = test_state();

        let Json(created) = request_sol_withdrawal(
            caller("u1"),
            State(state.clone()),
            Json(SolWithdrawalRequest {
                amount: 0.25,
                destination: DEST.into(),
            }),
        )
        .await
        .unwrap();

        let pending = state.ledger.list_pending_withdrawals().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, created.request_id);
    }
}
