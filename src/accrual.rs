// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Passive Accrual Poller
//!
//! Background task that periodically asks the ledger to apply passive
//! accrual. Per-account eligibility lives in the ledger
//! (`last_passive_accrual + PASSIVE_INTERVAL`), so the poller may fire
//! more often than the interval without double-crediting.
//!
//! Credited accounts produce notification requests which are forwarded
//! to the configured webhook (the chat collaborator delivers them to
//! users). Webhook failures are logged and never abort the sweep; the
//! credits are already committed by then.
//!
//! ## Shutdown
//!
//! Uses `tokio_util::sync::CancellationToken` for graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::ledger::Ledger;
use crate::models::AccrualNotification;

pub struct AccrualPoller {
    ledger: Arc<Ledger>,
    poll_interval: Duration,
    webhook: Option<WebhookNotifier>,
}

impl AccrualPoller {
    pub fn new(
        ledger: Arc<Ledger>,
        poll_interval: Duration,
        notify_webhook_url: Option<String>,
    ) -> Self {
        Self {
            ledger,
            poll_interval,
            webhook: notify_webhook_url.map(WebhookNotifier::new),
        }
    }

    /// Run the poller loop until the cancellation token is triggered.
    ///
    /// Should be spawned as a background task:
    /// ```rust,ignore
    /// tokio::spawn(poller.run(shutdown.clone()));
    /// ```
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "Accrual poller starting"
        );

        loop {
            if shutdown.is_cancelled() {
                info!("Accrual poller shutting down");
                return;
            }

            self.poll_step().await;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {},
                _ = shutdown.cancelled() => {
                    info!("Accrual poller shutting down");
                    return;
                }
            }
        }
    }

    /// Execute one sweep: apply accrual, forward any notifications.
    async fn poll_step(&self) {
        let notifications = match self.ledger.apply_passive_accrual().await {
            Ok(notifications) => notifications,
            Err(e) => {
                warn!(error = %e, "Accrual sweep failed");
                return;
            }
        };

        if notifications.is_empty() {
            return;
        }

        info!(count = notifications.len(), "Accrual poller: accounts credited");

        if let Some(webhook) = &self.webhook {
            for notification in &notifications {
                webhook.deliver(notification).await;
            }
        }
    }
}

/// Fire-and-forget notification sink.
struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    async fn deliver(&self, notification: &AccrualNotification) {
        let result = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {}
            Err(e) => warn!(
                account_id = %notification.account_id,
                error = %e,
                "Failed to deliver accrual notification"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::testutil::test_ledger;

    #[tokio::test]
    async fn poll_step_credits_eligible_accounts() {
        let (ledger, _clock, _dir) = test_ledger();
        let ledger = Arc::new(ledger);
        ledger.ensure_account("u1").await.unwrap();

        let poller = AccrualPoller::new(ledger.clone(), Duration::from_secs(60), None);
        poller.poll_step().await;

        assert_eq!(ledger.account_view("u1").await.unwrap().points, 50);
    }

    #[tokio::test]
    async fn repeated_steps_within_interval_credit_once() {
        let (ledger, clock, _dir) = test_ledger();
        let ledger = Arc::new(ledger);
        ledger.ensure_account("u1").await.unwrap();

        let poller = AccrualPoller::new(ledger.clone(), Duration::from_secs(60), None);
        for _ in 0..5 {
            poller.poll_step().await;
            clock.advance(60);
        }

        assert_eq!(ledger.account_view("u1").await.unwrap().points, 50);
    }

    #[tokio::test]
    async fn run_stops_on_cancellation() {
        let (ledger, _clock, _dir) = test_ledger();
        let poller = AccrualPoller::new(Arc::new(ledger), Duration::from_secs(3600), None);

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(poller.run(shutdown.clone()));

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("poller exits promptly")
            .expect("poller task does not panic");
    }
}
