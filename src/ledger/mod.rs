// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Ledger Core
//!
//! Owns every account and withdrawal record. All access goes through
//! transactional methods on [`Ledger`]; the raw collections are never
//! handed to callers.
//!
//! ## Mutation discipline
//!
//! Mutating operations serialize on one async mutex, apply their
//! changes to a working clone of the state, persist that clone, and
//! only on a successful save swap it into memory. A failed save
//! therefore leaves memory and disk at the pre-operation state — no
//! partially applied, unpersisted mutation is ever observable, and
//! multi-account updates (referral bonus, reject-with-refund) commit
//! as one unit.

pub mod accounts;
pub mod referrals;
pub mod store;
pub mod withdrawals;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clock::TimeSource;
use crate::config::EarnConfig;
use crate::error::LedgerError;
use crate::models::LedgerState;
use store::LedgerStore;

pub struct Ledger {
    state: Mutex<LedgerState>,
    store: LedgerStore,
    clock: Arc<dyn TimeSource>,
    earn: EarnConfig,
}

impl Ledger {
    /// Open the ledger, loading any previously persisted state.
    pub fn open(store: LedgerStore, clock: Arc<dyn TimeSource>, earn: EarnConfig) -> Self {
        let state = store.load();
        Self {
            state: Mutex::new(state),
            store,
            clock,
            earn,
        }
    }

    pub fn earn_config(&self) -> &EarnConfig {
        &self.earn
    }

    /// Run a mutating operation under the store-wide lock.
    ///
    /// The operation sees a working clone; it is swapped in only after
    /// a successful save. An operation that leaves the state unchanged
    /// (a no-op verdict) skips the save entirely.
    async fn commit<T>(
        &self,
        op: impl FnOnce(&mut LedgerState, i64) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut guard = self.state.lock().await;
        let now = self.clock.now();
        let mut working = guard.clone();
        let out = op(&mut working, now)?;
        if working != *guard {
            self.store.save(&working)?;
            *guard = working;
        }
        Ok(out)
    }

    /// Run a read-only projection under the lock.
    async fn read<T>(&self, op: impl FnOnce(&LedgerState, i64) -> T) -> T {
        let guard = self.state.lock().await;
        op(&guard, self.clock.now())
    }
}
