// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use faucet_ledger_server::{
    accrual::AccrualPoller,
    api::router,
    clock::SystemClock,
    config::Config,
    ledger::{store::LedgerStore, Ledger},
    solana::SolanaGateway,
    state::AppState,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let store = LedgerStore::new(&config.ledger_file);
    let ledger = Arc::new(Ledger::open(
        store,
        Arc::new(SystemClock),
        config.earn.clone(),
    ));
    let solana = Arc::new(SolanaGateway::from_config(&config));

    let shutdown = CancellationToken::new();
    let poller = AccrualPoller::new(
        ledger.clone(),
        Duration::from_secs(config.accrual_poll_secs),
        config.notify_webhook_url.clone(),
    );
    let poller_handle = tokio::spawn(poller.run(shutdown.clone()));

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(host = %config.host, port = config.port, "Invalid bind address: {e}");
            std::process::exit(1);
        }
    };

    let app = router(AppState::new(ledger, solana, config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "Failed to bind: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "Faucet ledger server listening (docs at /docs)");

    let serve = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()));
    if let Err(e) = serve.await {
        error!("Server failed: {e}");
    }

    // Let the poller observe the cancellation before exit.
    shutdown.cancel();
    let _ = poller_handle.await;
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_err() {
        error!("Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}

/// `LOG_FORMAT=json` switches to structured output; filtering follows
/// `RUST_LOG` with an info default for this crate.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("faucet_ledger_server=info"));

    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
