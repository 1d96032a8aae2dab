// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{AccountView, WithdrawalKind, WithdrawalRequest, WithdrawalStatus},
    state::AppState,
};

pub mod accounts;
pub mod admin;
pub mod faucet;
pub mod health;
pub mod withdrawals;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/account",
            get(accounts::get_account).post(accounts::ensure_account),
        )
        .route("/account/claim", post(accounts::claim_points))
        .route("/account/referral", post(accounts::apply_referral))
        .route(
            "/withdrawals/points",
            post(withdrawals::request_points_withdrawal),
        )
        .route("/withdrawals/sol", post(withdrawals::request_sol_withdrawal))
        .route("/faucet", post(faucet::request_faucet))
        .route("/solana/balance", get(faucet::get_balance))
        .route("/admin/withdrawals", get(admin::list_withdrawals))
        .route(
            "/admin/withdrawals/{request_id}/approve",
            post(admin::approve_withdrawal),
        )
        .route(
            "/admin/withdrawals/{request_id}/reject",
            post(admin::reject_withdrawal),
        )
        .route("/admin/accounts/{account_id}/points", put(admin::set_points))
        .route("/admin/stats", get(admin::get_stats))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        accounts::ensure_account,
        accounts::get_account,
        accounts::claim_points,
        accounts::apply_referral,
        withdrawals::request_points_withdrawal,
        withdrawals::request_sol_withdrawal,
        faucet::request_faucet,
        faucet::get_balance,
        admin::list_withdrawals,
        admin::approve_withdrawal,
        admin::reject_withdrawal,
        admin::set_points,
        admin::get_stats
    ),
    components(
        schemas(
            AccountView,
            WithdrawalRequest,
            WithdrawalKind,
            WithdrawalStatus,
            health::HealthResponse,
            accounts::ReferralRequest,
            accounts::ReferralResponse,
            accounts::ClaimResponse,
            withdrawals::PointsWithdrawalRequest,
            withdrawals::SolWithdrawalRequest,
            withdrawals::WithdrawalCreatedResponse,
            faucet::FaucetRequest,
            faucet::FaucetResponse,
            faucet::BalanceResponse,
            admin::WithdrawalListResponse,
            admin::SetPointsRequest,
            admin::SetPointsResponse,
            admin::StatsResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Accounts", description = "Account creation, claims and referrals"),
        (name = "Withdrawals", description = "Withdrawal requests"),
        (name = "Faucet", description = "Real SOL disbursement and balance lookup"),
        (name = "Admin", description = "Withdrawal adjudication and overrides")
    )
)]
struct ApiDoc;
