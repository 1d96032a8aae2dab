// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Real faucet disbursement and on-chain balance lookup.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::{auth::Caller, error::ApiError, solana, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct FaucetRequest {
    /// Base58 Solana address receiving the disbursement.
    pub destination: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FaucetResponse {
    pub signature: String,
    pub amount_sol: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BalanceQuery {
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub address: String,
    pub balance_sol: f64,
}

/// Disburse the fixed faucet amount to an address.
///
/// The cooldown slot is reserved in one ledger commit before the
/// transfer, so overlapping requests cannot both send. A failed
/// transfer hands the slot back, leaving the caller free to retry
/// immediately.
#[utoipa::path(
    post,
    path = "/v1/faucet",
    tag = "Faucet",
    request_body = FaucetRequest,
    responses(
        (status = 200, body = FaucetResponse),
        (status = 400, description = "Malformed destination address"),
        (status = 429, description = "Faucet cooldown active"),
        (status = 502, description = "Transfer failed"),
        (status = 503, description = "Real faucet disabled")
    )
)]
pub async fn request_faucet(
    Caller(account_id): Caller,
    State(state): State<AppState>,
    Json(request): Json<FaucetRequest>,
) -> Result<Json<FaucetResponse>, ApiError> {
    if !state.solana.faucet_enabled() {
        return Err(ApiError::from(crate::error::LedgerError::FeatureDisabled(
            "real faucet",
        )));
    }
    let destination = solana::validate_address(&request.destination)?;

    state.ledger.ensure_account(&account_id).await?;
    let previous = state.ledger.reserve_faucet_slot(&account_id).await?;

    let signature = match state.solana.send_faucet(&destination).await {
        Ok(signature) => signature,
        Err(send_err) => {
            if let Err(e) = state
                .ledger
                .release_faucet_slot(&account_id, previous)
                .await
            {
                warn!(account_id, error = %e, "Failed to roll back faucet cooldown after failed send");
            }
            return Err(send_err.into());
        }
    };

    Ok(Json(FaucetResponse {
        signature: signature.to_string(),
        amount_sol: state.solana.faucet_amount_sol(),
    }))
}

/// On-chain SOL balance of an arbitrary address.
#[utoipa::path(
    get,
    path = "/v1/solana/balance",
    tag = "Faucet",
    params(BalanceQuery),
    responses(
        (status = 200, body = BalanceResponse),
        (status = 400, description = "Malformed address"),
        (status = 502, description = "RPC failure")
    )
)]
pub async fn get_balance(
    Caller(_account_id): Caller,
    Query(query): Query<BalanceQuery>,
    State(state): State<AppState>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let address = solana::validate_address(&query.address)?;
    let balance_sol = state.solana.get_balance_sol(&address).await?;
    Ok(Json(BalanceResponse {
        address: query.address,
        balance_sol,
    }))
}
