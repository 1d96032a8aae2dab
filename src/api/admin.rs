// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only endpoints: the withdrawal queue, the balance override
//! and system statistics. Callers pass the admin gate before dispatch;
//! the ledger only records which admin handled a request.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::AdminCaller,
    error::ApiError,
    models::{LedgerStats, WithdrawalRequest},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct WithdrawalListQuery {
    /// `pending` (default) or `all`.
    pub scope: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawalListResponse {
    pub withdrawals: Vec<WithdrawalRequest>,
    pub total: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPointsRequest {
    /// New balance; negative values are rejected.
    pub points: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SetPointsResponse {
    pub account_id: String,
    pub balance: u64,
}

/// System statistics for the admin overview.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub ledger: LedgerStats,
    pub uptime_seconds: u64,
}

/// List withdrawal requests (pending queue by default).
#[utoipa::path(
    get,
    path = "/v1/admin/withdrawals",
    tag = "Admin",
    params(WithdrawalListQuery),
    responses(
        (status = 200, body = WithdrawalListResponse),
        (status = 403, description = "Caller is not an administrator")
    )
)]
pub async fn list_withdrawals(
    AdminCaller(_admin_id): AdminCaller,
    Query(query): Query<WithdrawalListQuery>,
    State(state): State<AppState>,
) -> Result<Json<WithdrawalListResponse>, ApiError> {
    let withdrawals = match query.scope.as_deref() {
        None | Some("pending") => state.ledger.list_pending_withdrawals().await,
        Some("all") => state.ledger.list_all_withdrawals().await,
        Some(other) => {
            return Err(ApiError::bad_request(format!(
                "unknown scope {other:?}, expected \"pending\" or \"all\""
            )))
        }
    };
    let total = withdrawals.len();
    Ok(Json(WithdrawalListResponse { withdrawals, total }))
}

/// Approve a pending withdrawal. Records the decision; never moves
/// funds itself.
#[utoipa::path(
    post,
    path = "/v1/admin/withdrawals/{request_id}/approve",
    tag = "Admin",
    params(("request_id" = String, Path, description = "Withdrawal request id")),
    responses(
        (status = 200, body = WithdrawalRequest),
        (status = 404, description = "Unknown request"),
        (status = 409, description = "Request already handled")
    )
)]
pub async fn approve_withdrawal(
    AdminCaller(admin_id): AdminCaller,
    Path(request_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WithdrawalRequest>, ApiError> {
    let request = state
        .ledger
        .approve_withdrawal(&request_id, &admin_id)
        .await?;
    Ok(Json(request))
}

/// Reject a pending withdrawal, refunding reserved points.
#[utoipa::path(
    post,
    path = "/v1/admin/withdrawals/{request_id}/reject",
    tag = "Admin",
    params(("request_id" = String, Path, description = "Withdrawal request id")),
    responses(
        (status = 200, body = WithdrawalRequest),
        (status = 404, description = "Unknown request"),
        (status = 409, description = "Request already handled")
    )
)]
pub async fn reject_withdrawal(
    AdminCaller(admin_id): AdminCaller,
    Path(request_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WithdrawalRequest>, ApiError> {
    let request = state
        .ledger
        .reject_withdrawal(&request_id, &admin_id)
        .await?;
    Ok(Json(request))
}

/// Override an account's point balance.
#[utoipa::path(
    put,
    path = "/v1/admin/accounts/{account_id}/points",
    tag = "Admin",
    params(("account_id" = String, Path, description = "Account id")),
    request_body = SetPointsRequest,
    responses(
        (status = 200, body = SetPointsResponse),
        (status = 400, description = "Negative balance")
    )
)]
pub async fn set_points(
    AdminCaller(_admin_id): AdminCaller,
    Path(account_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetPointsRequest>,
) -> Result<Json<SetPointsResponse>, ApiError> {
    let balance = state.ledger.set_points(&account_id, request.points).await?;
    Ok(Json(SetPointsResponse {
        account_id,
        balance,
    }))
}

/// Aggregate counters: accounts, withdrawal queue, uptime.
#[utoipa::path(
    get,
    path = "/v1/admin/stats",
    tag = "Admin",
    responses((status = 200, body = StatsResponse))
)]
pub async fn get_stats(
    AdminCaller(_admin_id): AdminCaller,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(StatsResponse {
        ledger: state.ledger.stats().await,
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WithdrawalStatus;
    use crate::state::testutil::test_state;
    use axum::http::StatusCode;

    fn admin() -> AdminCaller {
        AdminCaller("admin-1".to_string())
    }

    #[tokio::test]
    async fn list_defaults_to_pending_scope() {
        let (state, _clock, _dir) = test_state();
        state.ledger.set_points("u1", 100).await.unwrap();
        let kept = state
            .ledger
            .request_points_withdrawal("u1", 10)
            .await
            .unwrap();
        let handled = state
            .ledger
            .request_points_withdrawal("u1", 10)
            .await
            .unwrap();
        state
            .ledger
            .approve_withdrawal(&handled, "admin-1")
            .await
            .unwrap();

        let Json(response) = list_withdrawals(
            admin(),
            Query(WithdrawalListQuery { scope: None }),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.withdrawals[0].id, kept);

        let Json(all) = list_withdrawals(
            admin(),
            Query(WithdrawalListQuery {
                scope: Some("all".into()),
            }),
            State(state),
        )
        .await
        .unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn unknown_scope_is_a_bad_request() {
        let (state, _clock, _dir) = test_state();
        let err = list_withdrawals(
            admin(),
            Query(WithdrawalListQuery {
                scope: Some("finished".into()),
            }),
            State(state),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approve_records_the_admin() {
        let (state, _clock, _dir) = test_state();
        state.ledger.set_points("u1", 100).await.unwrap();
        let request_id = state
            .ledger
            .request_points_withdrawal("u1", 10)
            .await
            .unwrap();

        let Json(request) =
            approve_withdrawal(admin(), Path(request_id.clone()), State(state.clone()))
                .await
                .unwrap();
        assert_eq!(request.status, WithdrawalStatus::Approved);
        assert_eq!(request.handled_by.as_deref(), Some("admin-1"));

        // Second approval is a conflict.
        let err = approve_withdrawal(admin(), Path(request_id), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn reject_refunds_through_the_api() {
        let (state, _clock, _dir) = test_state();
        state.ledger.set_points("u1", 100).await.unwrap();
        let request_id = state
            .ledger
            .request_points_withdrawal("u1", 40)
            .await
            .unwrap();
        assert_eq!(state.ledger.account_view("u1").await.unwrap().points, 60);

        reject_withdrawal(admin(), Path(request_id), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(state.ledger.account_view("u1").await.unwrap().points, 100);
    }

    #[tokio::test]
    async fn set_points_validates_sign() {
        let (state, _clock, _dir) = test_state();

        let err = set_points(
            admin(),
            Path("u1".to_string()),
            State(state.clone()),
            Json(SetPointsRequest { points: -1 }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let Json(response) = set_points(
            admin(),
            Path("u1".to_string()),
            State(state),
            Json(SetPointsRequest { points: 500 }),
        )
        .await
        .unwrap();
        assert_eq!(response.balance, 500);
    }

    #[tokio::test]
    async fn stats_reflect_queue_state() {
        let (state, _clock, _dir) = test_state();
        state.ledger.set_points("u1", 100).await.unwrap();
        state
            .ledger
            .request_points_withdrawal("u1", 10)
            .await
            .unwrap();

        let Json(stats) = get_stats(admin(), State(state)).await.unwrap();
        assert_eq!(stats.ledger.total_accounts, 1);
        assert_eq!(stats.ledger.pending_withdrawals, 1);
        assert_eq!(stats.ledger.approved_withdrawals, 0);
    }
}
