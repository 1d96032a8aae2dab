// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Referral linkage and bonus crediting.

use tracing::info;

use super::Ledger;
use crate::error::LedgerError;

impl Ledger {
    /// Link `account_id` to `referrer_id` and credit the referrer.
    ///
    /// Returns `Ok(true)` when the referral was applied and `Ok(false)`
    /// for the deliberate no-op cases: self-referral, a referrer that
    /// does not resolve to an existing account, or an account whose
    /// `referred_by` is already set (write-once, so any repeat call is
    /// a no-op regardless of referrer). The link, the referrer's
    /// counter and the bonus commit as one unit.
    pub async fn apply_referral(
        &self,
        account_id: &str,
        referrer_id: &str,
    ) -> Result<bool, LedgerError> {
        if account_id == referrer_id {
            return Ok(false);
        }

        let bonus = self.earn.referral_bonus;
        let applied = self
            .commit(|state, _now| {
                if !state.users.contains_key(referrer_id) {
                    return Ok(false);
                }
                let account = state
                    .users
                    .get_mut(account_id)
                    .ok_or_else(|| LedgerError::NotFound(format!("account {account_id}")))?;
                if account.referred_by.is_some() {
                    return Ok(false);
                }
                account.referred_by = Some(referrer_id.to_string());

                if let Some(referrer) = state.users.get_mut(referrer_id) {
                    referrer.referral_count += 1;
                    referrer.points += bonus;
                }
                Ok(true)
            })
            .await?;

        if applied {
            info!(account_id, referrer_id, bonus, "Referral applied");
        }
        Ok(applied)
    }
}
