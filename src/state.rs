// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::ledger::Ledger;
use crate::solana::SolanaGateway;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub solana: Arc<SolanaGateway>,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(ledger: Arc<Ledger>, solana: Arc<SolanaGateway>, config: Config) -> Self {
        Self {
            ledger,
            solana,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
