// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Injectable time source.
//!
//! All ledger operations take their notion of "now" from a [`TimeSource`]
//! rather than calling the system clock directly, so cooldown and accrual
//! behaviour can be driven deterministically in tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Supplies the current time as unix epoch seconds.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> i64;
}

/// Production time source backed by the system clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Settable time source for deterministic tests.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
