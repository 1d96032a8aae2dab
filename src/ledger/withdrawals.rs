// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Withdrawal request workflow.
//!
//! State machine per request: `Pending -> Approved` or
//! `Pending -> Rejected`, both terminal. Points withdrawals reserve the
//! amount at request time; rejecting refunds it in the same commit as
//! the status transition. Approving a SOL request records the decision
//! only — it never moves funds.

use tracing::info;
use uuid::Uuid;

use super::Ledger;
use crate::error::LedgerError;
use crate::models::{LedgerStats, WithdrawalKind, WithdrawalRequest, WithdrawalStatus};

impl Ledger {
    /// Create a pending points withdrawal, debiting the balance up
    /// front so the reserved points cannot be spent while pending.
    pub async fn request_points_withdrawal(
        &self,
        account_id: &str,
        amount: u64,
    ) -> Result<String, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount(
                "withdrawal amount must be positive".into(),
            ));
        }

        let request_id = self
            .commit(|state, now| {
                let account = state
                    .users
                    .get_mut(account_id)
                    .ok_or_else(|| LedgerError::NotFound(format!("account {account_id}")))?;

                account.points = account
                    .points
                    .checked_sub(amount)
                    .ok_or(LedgerError::InsufficientBalance)?;

                let id = Uuid::new_v4().to_string();
                state.withdrawals.push(WithdrawalRequest {
                    id: id.clone(),
                    account_id: account_id.to_string(),
                    kind: WithdrawalKind::Points,
                    points_amount: Some(amount),
                    sol_amount: None,
                    destination: None,
                    status: WithdrawalStatus::Pending,
                    created_at: now,
                    handled_by: None,
                    handled_at: None,
                });
                Ok(id)
            })
            .await?;

        info!(account_id, amount, request_id, "Points withdrawal requested");
        Ok(request_id)
    }

    /// Create a pending SOL withdrawal.
    ///
    /// The destination must already be syntactically validated by the
    /// caller. No points are debited; SOL requests are not pre-funded
    /// from the ledger.
    pub async fn request_sol_withdrawal(
        &self,
        account_id: &str,
        amount: f64,
        destination: &str,
    ) -> Result<String, LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(
                "withdrawal amount must be positive".into(),
            ));
        }

        let request_id = self
            .commit(|state, now| {
                if !state.users.contains_key(account_id) {
                    return Err(LedgerError::NotFound(format!("account {account_id}")));
                }
                let id = Uuid::new_v4().to_string();
                state.withdrawals.push(WithdrawalRequest {
                    id: id.clone(),
                    account_id: account_id.to_string(),
                    kind: WithdrawalKind::Sol,
                    points_amount: None,
                    sol_amount: Some(amount),
                    destination: Some(destination.to_string()),
                    status: WithdrawalStatus::Pending,
                    created_at: now,
                    handled_by: None,
                    handled_at: None,
                });
                Ok(id)
            })
            .await?;

        info!(account_id, amount, request_id, "SOL withdrawal requested");
        Ok(request_id)
    }

    /// Approve a pending request. Records the decision only; for SOL
    /// requests the actual transfer is a separate, explicit action.
    pub async fn approve_withdrawal(
        &self,
        request_id: &str,
        admin_id: &str,
    ) -> Result<WithdrawalRequest, LedgerError> {
        let request = self
            .commit(|state, now| {
                let request = find_pending(state, request_id)?;
                request.status = WithdrawalStatus::Approved;
                request.handled_by = Some(admin_id.to_string());
                request.handled_at = Some(now);
                Ok(request.clone())
            })
            .await?;

        info!(request_id, admin_id, "Withdrawal approved");
        Ok(request)
    }

    /// Reject a pending request, refunding reserved points in the same
    /// commit as the status transition.
    pub async fn reject_withdrawal(
        &self,
        request_id: &str,
        admin_id: &str,
    ) -> Result<WithdrawalRequest, LedgerError> {
        let request = self
            .commit(|state, now| {
                let request = find_pending(state, request_id)?;
                request.status = WithdrawalStatus::Rejected;
                request.handled_by = Some(admin_id.to_string());
                request.handled_at = Some(now);
                let rejected = request.clone();

                if rejected.kind == WithdrawalKind::Points {
                    let amount = rejected.points_amount.unwrap_or(0);
                    let account = state
                        .users
                        .get_mut(&rejected.account_id)
                        .ok_or_else(|| {
                            LedgerError::NotFound(format!("account {}", rejected.account_id))
                        })?;
                    account.points += amount;
                }
                Ok(rejected)
            })
            .await?;

        info!(request_id, admin_id, "Withdrawal rejected");
        Ok(request)
    }

    pub async fn list_pending_withdrawals(&self) -> Vec<WithdrawalRequest> {
        self.read(|state, _| {
            state
                .withdrawals
                .iter()
                .filter(|w| w.status == WithdrawalStatus::Pending)
                .cloned()
                .collect()
        })
        .await
    }

    pub async fn list_all_withdrawals(&self) -> Vec<WithdrawalRequest> {
        self.read(|state, _| state.withdrawals.clone()).await
    }

    pub async fn stats(&self) -> LedgerStats {
        self.read(|state, _| LedgerStats {
            total_accounts: state.users.len(),
            pending_withdrawals: count_status(state, WithdrawalStatus::Pending),
            approved_withdrawals: count_status(state, WithdrawalStatus::Approved),
            rejected_withdrawals: count_status(state, WithdrawalStatus::Rejected),
        })
        .await
    }
}

fn find_pending<'a>(
    state: &'a mut crate::models::LedgerState,
    request_id: &str,
) -> Result<&'a mut WithdrawalRequest, LedgerError> {
    let request = state
        .withdrawals
        .iter_mut()
        .find(|w| w.id == request_id)
        .ok_or_else(|| LedgerError::NotFound(format!("withdrawal request {request_id}")))?;
    if request.status != WithdrawalStatus::Pending {
        return Err(LedgerError::RequestNotPending(request_id.to_string()));
    }
    Ok(request)
}

fn count_status(state: &crate::models::LedgerState, status: WithdrawalStatus) -> usize {
    state
        .withdrawals
        .iter()
        .filter(|w| w.status == status)
        .count()
}
