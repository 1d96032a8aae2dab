// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account endpoints: lazy registration, balance view, the manual
//! points claim and referral linking. All act on the caller's own
//! account (id from the `X-Caller-Id` header the chat transport sets).

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth::Caller,
    error::ApiError,
    models::AccountView,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReferralRequest {
    /// Id of the account whose referral link brought this caller in.
    pub referrer_id: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ReferralResponse {
    /// False for the no-op cases (self-referral, unknown referrer,
    /// already referred).
    pub applied: bool,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ClaimResponse {
    pub balance: u64,
}

/// Register the caller's account if absent and return its view.
#[utoipa::path(
    post,
    path = "/v1/account",
    tag = "Accounts",
    responses(
        (status = 200, body = AccountView),
        (status = 401, description = "Missing caller identity")
    )
)]
pub async fn ensure_account(
    Caller(caller_id): Caller,
    State(state): State<AppState>,
) -> Result<Json<AccountView>, ApiError> {
    state.ledger.ensure_account(&caller_id).await?;
    Ok(Json(state.ledger.account_view(&caller_id).await?))
}

/// View of the caller's account (registers it on first contact).
#[utoipa::path(
    get,
    path = "/v1/account",
    tag = "Accounts",
    responses((status = 200, body = AccountView))
)]
pub async fn get_account(
    Caller(caller_id): Caller,
    State(state): State<AppState>,
) -> Result<Json<AccountView>, ApiError> {
    state.ledger.ensure_account(&caller_id).await?;
    Ok(Json(state.ledger.account_view(&caller_id).await?))
}

/// Cooldown-gated manual points claim.
#[utoipa::path(
    post,
    path = "/v1/account/claim",
    tag = "Accounts",
    responses(
        (status = 200, body = ClaimResponse),
        (status = 429, description = "Cooldown active")
    )
)]
pub async fn claim_points(
    Caller(caller_id): Caller,
    State(state): State<AppState>,
) -> Result<Json<ClaimResponse>, ApiError> {
    state.ledger.ensure_account(&caller_id).await?;
    let balance = state.ledger.claim_points(&caller_id).await?;
    Ok(Json(ClaimResponse { balance }))
}

/// Apply a one-time referral for the caller's account.
#[utoipa::path(
    post,
    path = "/v1/account/referral",
    tag = "Accounts",
    request_body = ReferralRequest,
    responses((status = 200, body = ReferralResponse))
)]
pub async fn apply_referral(
    Caller(caller_id): Caller,
    State(state): State<AppState>,
    Json(request): Json<ReferralRequest>,
) -> Result<Json<ReferralResponse>, ApiError> {
    state.ledger.ensure_account(&caller_id).await?;
    let applied = state
        .ledger
        .apply_referral(&caller_id, &request.referrer_id)
        .await?;
    Ok(Json(ReferralResponse { applied }))
}
