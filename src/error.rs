// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error types.
//!
//! [`LedgerError`] is the domain taxonomy reported by the ledger core;
//! every variant is a local, recoverable condition for the immediate
//! caller. [`ApiError`] is the HTTP-facing wrapper that maps domain
//! errors to status codes and a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::ledger::store::StoreError;

/// Domain errors produced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("cooldown active, {seconds_remaining}s remaining")]
    CooldownActive { seconds_remaining: i64 },

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("withdrawal request {0} is not pending")]
    RequestNotPending(String),

    #[error("ledger persistence failed: {0}")]
    Persistence(#[from] StoreError),

    #[error("{0} is disabled")]
    FeatureDisabled(&'static str),

    #[error("disbursement failed: {0}")]
    Disbursement(String),
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let status = match &err {
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            LedgerError::InsufficientBalance => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::InvalidAmount(_) | LedgerError::InvalidAddress(_) => {
                StatusCode::BAD_REQUEST
            }
            LedgerError::RequestNotPending(_) => StatusCode::CONFLICT,
            LedgerError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LedgerError::FeatureDisabled(_) => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::Disbursement(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);

        let forbidden = ApiError::forbidden("nope");
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn ledger_errors_map_to_expected_statuses() {
        let cases: Vec<(LedgerError, StatusCode)> = vec![
            (
                LedgerError::NotFound("account u1".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                LedgerError::CooldownActive {
                    seconds_remaining: 30,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                LedgerError::InsufficientBalance,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                LedgerError::InvalidAmount("zero".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                LedgerError::InvalidAddress("garbage".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                LedgerError::RequestNotPending("w1".into()),
                StatusCode::CONFLICT,
            ),
            (
                LedgerError::FeatureDisabled("real faucet"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                LedgerError::Disbursement("rpc timeout".into()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
