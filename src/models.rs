// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger data model.
//!
//! The persisted document holds two collections: `users` (account id →
//! [`Account`]) and `withdrawals` (append-only list of
//! [`WithdrawalRequest`], never reordered, stable ids).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-user ledger record.
///
/// All timestamps are unix epoch seconds; `0` means "never".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Account {
    /// Point balance. Never driven negative; debits are checked first.
    pub points: u64,
    /// Last cooldown-gated manual claim.
    #[serde(default)]
    pub last_manual_claim: i64,
    /// Last scheduled passive accrual grant. Eligibility is
    /// `now - last_passive_accrual >= PASSIVE_INTERVAL`.
    #[serde(default)]
    pub last_passive_accrual: i64,
    /// Last real SOL faucet disbursement.
    #[serde(default)]
    pub last_real_disbursement: i64,
    /// Referrer account id. Write-once, never cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    /// Number of accounts this account has referred.
    #[serde(default)]
    pub referral_count: u64,
    /// Creation time, immutable.
    pub created_at: i64,
}

impl Account {
    pub fn new(created_at: i64) -> Self {
        Self {
            points: 0,
            last_manual_claim: 0,
            last_passive_accrual: 0,
            last_real_disbursement: 0,
            referred_by: None,
            referral_count: 0,
            created_at,
        }
    }
}

/// Withdrawal request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalKind {
    /// Internal points; the amount is reserved from the balance at
    /// request time.
    Points,
    /// External SOL; not pre-funded from the points ledger.
    Sol,
}

/// Withdrawal request status.
///
/// `Pending` transitions exactly once to `Approved` or `Rejected`;
/// terminal requests are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A user-initiated, admin-adjudicated withdrawal request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct WithdrawalRequest {
    /// Stable unique id (UUID), assigned at creation.
    pub id: String,
    /// Owning account id (back-reference only).
    pub account_id: String,
    pub kind: WithdrawalKind,
    /// Points amount, set iff `kind == Points`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_amount: Option<u64>,
    /// SOL amount, set iff `kind == Sol`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol_amount: Option<f64>,
    /// Destination address, required for SOL requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub status: WithdrawalStatus,
    pub created_at: i64,
    /// Admin who handled the request, once terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_at: Option<i64>,
}

/// The whole persisted ledger document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerState {
    pub users: HashMap<String, Account>,
    pub withdrawals: Vec<WithdrawalRequest>,
}

/// Read-only account projection returned to the chat collaborator.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct AccountView {
    pub account_id: String,
    pub points: u64,
    pub referral_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    pub created_at: i64,
}

impl AccountView {
    pub fn from_account(account_id: &str, account: &Account) -> Self {
        Self {
            account_id: account_id.to_string(),
            points: account.points,
            referral_count: account.referral_count,
            referred_by: account.referred_by.clone(),
            created_at: account.created_at,
        }
    }
}

/// Aggregate counters for the admin stats view.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct LedgerStats {
    pub total_accounts: usize,
    pub pending_withdrawals: usize,
    pub approved_withdrawals: usize,
    pub rejected_withdrawals: usize,
}

/// Per-account notification request emitted by a passive accrual sweep.
///
/// Delivery is the chat collaborator's job; the ledger only produces
/// these and never depends on them being delivered.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AccrualNotification {
    pub account_id: String,
    pub amount: u64,
    pub balance: u64,
}
