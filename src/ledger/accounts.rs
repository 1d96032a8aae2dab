// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account management: lazy creation, cooldown-gated claims, passive
//! accrual, faucet bookkeeping and the admin balance override.

use tracing::info;

use super::Ledger;
use crate::error::LedgerError;
use crate::models::{Account, AccountView, AccrualNotification};

impl Ledger {
    /// Create a zero-balance account if absent. Idempotent; an existing
    /// account is left untouched and nothing is written.
    pub async fn ensure_account(&self, account_id: &str) -> Result<(), LedgerError> {
        let exists = self
            .read(|state, _| state.users.contains_key(account_id))
            .await;
        if exists {
            return Ok(());
        }

        self.commit(|state, now| {
            state
                .users
                .entry(account_id.to_string())
                .or_insert_with(|| Account::new(now));
            Ok(())
        })
        .await?;

        info!(account_id, "Created account");
        Ok(())
    }

    /// Read-only projection of one account.
    pub async fn account_view(&self, account_id: &str) -> Result<AccountView, LedgerError> {
        self.read(|state, _| {
            state
                .users
                .get(account_id)
                .map(|account| AccountView::from_account(account_id, account))
                .ok_or_else(|| LedgerError::NotFound(format!("account {account_id}")))
        })
        .await
    }

    /// Credit the fixed claim amount, gated by the manual-claim cooldown.
    ///
    /// Returns the new balance.
    pub async fn claim_points(&self, account_id: &str) -> Result<u64, LedgerError> {
        let amount = self.earn.claim_amount;
        let cooldown = self.earn.claim_cooldown_secs;

        let balance = self
            .commit(|state, now| {
                let account = state
                    .users
                    .get_mut(account_id)
                    .ok_or_else(|| LedgerError::NotFound(format!("account {account_id}")))?;

                let elapsed = now - account.last_manual_claim;
                if account.last_manual_claim != 0 && elapsed < cooldown {
                    return Err(LedgerError::CooldownActive {
                        seconds_remaining: cooldown - elapsed,
                    });
                }

                account.points += amount;
                account.last_manual_claim = now;
                Ok(account.points)
            })
            .await?;

        info!(account_id, amount, balance, "Points claimed");
        Ok(balance)
    }

    /// Credit every account whose passive accrual interval has elapsed.
    ///
    /// One batch pass; persists once, and only when something changed.
    /// Returns a notification request per credited account — delivering
    /// them is the caller's concern and never rolls back the credit.
    pub async fn apply_passive_accrual(&self) -> Result<Vec<AccrualNotification>, LedgerError> {
        let amount = self.earn.passive_amount;
        let interval = self.earn.passive_interval_secs;

        let mut guard = self.state.lock().await;
        let now = self.clock.now();
        let mut working = guard.clone();

        let mut notifications = Vec::new();
        for (account_id, account) in working.users.iter_mut() {
            if now - account.last_passive_accrual >= interval {
                account.points += amount;
                account.last_passive_accrual = now;
                notifications.push(AccrualNotification {
                    account_id: account_id.clone(),
                    amount,
                    balance: account.points,
                });
            }
        }

        if notifications.is_empty() {
            return Ok(notifications);
        }

        self.store.save(&working)?;
        *guard = working;

        info!(credited = notifications.len(), amount, "Passive accrual applied");
        Ok(notifications)
    }

    /// Administrative balance override. Creates the account if absent.
    pub async fn set_points(&self, account_id: &str, value: i64) -> Result<u64, LedgerError> {
        if value < 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "points balance must be non-negative, got {value}"
            )));
        }
        let value = value as u64;

        let balance = self
            .commit(|state, now| {
                let account = state
                    .users
                    .entry(account_id.to_string())
                    .or_insert_with(|| Account::new(now));
                account.points = value;
                Ok(account.points)
            })
            .await?;

        info!(account_id, balance, "Points balance overridden");
        Ok(balance)
    }

    /// Reserve the real-faucet cooldown slot.
    ///
    /// Checks and advances `last_real_disbursement` in one commit, so
    /// of two concurrent disbursement attempts only one can pass the
    /// cooldown. Returns the previous timestamp; a caller whose send
    /// fails hands it back to [`Ledger::release_faucet_slot`].
    pub async fn reserve_faucet_slot(&self, account_id: &str) -> Result<i64, LedgerError> {
        let cooldown = self.earn.faucet_cooldown_secs;
        self.commit(|state, now| {
            let account = state
                .users
                .get_mut(account_id)
                .ok_or_else(|| LedgerError::NotFound(format!("account {account_id}")))?;

            let elapsed = now - account.last_real_disbursement;
            if account.last_real_disbursement != 0 && elapsed < cooldown {
                return Err(LedgerError::CooldownActive {
                    seconds_remaining: cooldown - elapsed,
                });
            }
            let previous = account.last_real_disbursement;
            account.last_real_disbursement = now;
            Ok(previous)
        })
        .await
    }

    /// Roll a reserved faucet slot back after a failed send, restoring
    /// the pre-reservation timestamp so the caller can retry
    /// immediately.
    pub async fn release_faucet_slot(
        &self,
        account_id: &str,
        previous: i64,
    ) -> Result<(), LedgerError> {
        self.commit(|state, _now| {
            let account = state
                .users
                .get_mut(account_id)
                .ok_or_else(|| LedgerError::NotFound(format!("account {account_id}")))?;
            account.last_real_disbursement = previous;
            Ok(())
        })
        .await
    }
}
