// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Faucet Ledger - Points Ledger and Withdrawal Adjudication Service
//!
//! This crate provides a file-backed points ledger with cooldown-gated
//! claims, passive accrual, referral bonuses and an admin-adjudicated
//! withdrawal queue, with Solana as the optional disbursement layer.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Caller identification and the admin gate
//! - `ledger` - Balances, accrual and the withdrawal state machine
//! - `solana` - Address validation, balance lookup, real faucet
//! - `accrual` - Background passive-accrual poller

pub mod accrual;
pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod solana;
pub mod state;
