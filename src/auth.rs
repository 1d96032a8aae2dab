// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Caller identity and the admin gate.
//!
//! The chat transport authenticates users itself and forwards the
//! caller's id in the `X-Caller-Id` header; this module only extracts
//! it. The admin gate checks that id against the configured allow-set
//! before dispatch — the ledger core never re-checks authorization, it
//! just records the admin id it is handed.
//!
//! Use the extractors in handlers:
//!
//! ```rust,ignore
//! async fn claim(Caller(caller_id): Caller) -> impl IntoResponse { ... }
//! async fn approve(AdminCaller(admin_id): AdminCaller) -> impl IntoResponse { ... }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ApiError;
use crate::state::AppState;

pub const CALLER_HEADER: &str = "x-caller-id";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing {CALLER_HEADER} header")]
    MissingCallerHeader,
    #[error("malformed {CALLER_HEADER} header")]
    InvalidCallerHeader,
    #[error("caller is not an administrator")]
    NotAdmin,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::MissingCallerHeader | AuthError::InvalidCallerHeader => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::NotAdmin => StatusCode::FORBIDDEN,
        };
        ApiError::new(status, self.to_string()).into_response()
    }
}

/// Extractor for the caller id forwarded by the chat transport.
pub struct Caller(pub String);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller_id = parts
            .headers
            .get(CALLER_HEADER)
            .ok_or(AuthError::MissingCallerHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidCallerHeader)?
            .trim();

        if caller_id.is_empty() {
            return Err(AuthError::InvalidCallerHeader);
        }

        Ok(Caller(caller_id.to_string()))
    }
}

/// Extractor that additionally requires the caller to be a configured
/// administrator.
pub struct AdminCaller(pub String);

impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Caller(caller_id) = Caller::from_request_parts(parts, state).await?;

        if !state.config.is_admin(&caller_id) {
            return Err(AuthError::NotAdmin);
        }

        Ok(AdminCaller(caller_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testutil::test_state;
    use axum::http::Request;

    fn parts_with_caller(caller: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(caller) = caller {
            builder = builder.header("X-Caller-Id", caller);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn caller_requires_header() {
        let (state, _clock, _dir) = test_state();
        let mut parts = parts_with_caller(None);

        let result = Caller::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.err(), Some(AuthError::MissingCallerHeader));
    }

    #[tokio::test]
    async fn caller_rejects_blank_header() {
        let (state, _clock, _dir) = test_state();
        let mut parts = parts_with_caller(Some("   "));

        let result = Caller::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.err(), Some(AuthError::InvalidCallerHeader));
    }

    #[tokio::test]
    async fn caller_extracts_trimmed_id() {
        let (state, _clock, _dir) = test_state();
        let mut parts = parts_with_caller(Some(" user-7 "));

        let Caller(caller_id) = Caller::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(caller_id, "user-7");
    }

    #[tokio::test]
    async fn admin_gate_rejects_non_admin() {
        let (state, _clock, _dir) = test_state();
        let mut parts = parts_with_caller(Some("user-7"));

        let result = AdminCaller::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.err(), Some(AuthError::NotAdmin));
    }

    #[tokio::test]
    async fn admin_gate_accepts_configured_admin() {
        let (state, _clock, _dir) = test_state();
        let mut parts = parts_with_caller(Some("admin-1"));

        let AdminCaller(admin_id) = AdminCaller::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(admin_id, "admin-1");
    }
}
