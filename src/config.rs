// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. An
//! unparseable value is a fatal startup error; a missing optional
//! credential only disables the feature that needs it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LEDGER_FILE` | Path of the ledger JSON document | `users.json` |
//! | `RPC_URL` | Solana RPC endpoint | mainnet-beta |
//! | `REAL_FAUCET_ENABLED` | Enable real SOL disbursement | `false` |
//! | `FUNDING_KEYPAIR_JSON` | Funding keypair as a JSON byte array | unset |
//! | `ADMIN_IDS` | Comma-separated privileged caller ids | empty |
//! | `CLAIM_AMOUNT` | Points per manual claim | `10` |
//! | `CLAIM_COOLDOWN_SECS` | Manual claim cooldown | `60` |
//! | `PASSIVE_AMOUNT` | Points per passive accrual grant | `50` |
//! | `PASSIVE_INTERVAL_SECS` | Passive accrual interval | `86400` |
//! | `REFERRAL_BONUS` | Points credited to a referrer | `20` |
//! | `FAUCET_AMOUNT_SOL` | SOL per real faucet disbursement | `0.001` |
//! | `FAUCET_COOLDOWN_SECS` | Real faucet cooldown | `3600` |
//! | `ACCRUAL_POLL_SECS` | Accrual poller period | `60` |
//! | `NOTIFY_WEBHOOK_URL` | Accrual notification sink | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::collections::HashSet;
use std::env;

use thiserror::Error;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_LEDGER_FILE: &str = "users.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Point-earning and cooldown constants used by the ledger core.
#[derive(Debug, Clone)]
pub struct EarnConfig {
    pub claim_amount: u64,
    pub claim_cooldown_secs: i64,
    pub passive_amount: u64,
    pub passive_interval_secs: i64,
    pub referral_bonus: u64,
    pub faucet_cooldown_secs: i64,
}

impl Default for EarnConfig {
    fn default() -> Self {
        Self {
            claim_amount: 10,
            claim_cooldown_secs: 60,
            passive_amount: 50,
            passive_interval_secs: 86_400,
            referral_bonus: 20,
            faucet_cooldown_secs: 3_600,
        }
    }
}

/// Full service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ledger_file: String,
    pub rpc_url: String,
    pub real_faucet_enabled: bool,
    /// Raw keypair JSON; parsed (and possibly rejected) by the faucet.
    pub funding_keypair_json: Option<String>,
    pub faucet_amount_sol: f64,
    pub admin_ids: HashSet<String>,
    pub earn: EarnConfig,
    pub accrual_poll_secs: u64,
    pub notify_webhook_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8080)?,
            ledger_file: env::var("LEDGER_FILE")
                .unwrap_or_else(|_| DEFAULT_LEDGER_FILE.to_string()),
            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            real_faucet_enabled: env_flag("REAL_FAUCET_ENABLED"),
            funding_keypair_json: env::var("FUNDING_KEYPAIR_JSON").ok(),
            faucet_amount_sol: parse_env("FAUCET_AMOUNT_SOL", 0.001)?,
            admin_ids: env::var("ADMIN_IDS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
            earn: EarnConfig {
                claim_amount: parse_env("CLAIM_AMOUNT", 10)?,
                claim_cooldown_secs: parse_env("CLAIM_COOLDOWN_SECS", 60)?,
                passive_amount: parse_env("PASSIVE_AMOUNT", 50)?,
                passive_interval_secs: parse_env("PASSIVE_INTERVAL_SECS", 86_400)?,
                referral_bonus: parse_env("REFERRAL_BONUS", 20)?,
                faucet_cooldown_secs: parse_env("FAUCET_COOLDOWN_SECS", 3_600)?,
            },
            accrual_poll_secs: parse_env("ACCRUAL_POLL_SECS", 60)?,
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL").ok(),
        })
    }

    pub fn is_admin(&self, caller_id: &str) -> bool {
        self.admin_ids.contains(caller_id)
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn defaults_apply_when_env_unset() {
        let _guard = env_lock();
        let config = Config::from_env().expect("default config loads");
        assert_eq!(config.earn.claim_amount, 10);
        assert_eq!(config.earn.passive_interval_secs, 86_400);
        assert_eq!(config.earn.referral_bonus, 20);
        assert!(!config.real_faucet_enabled);
        assert!(config.admin_ids.is_empty());
    }

    #[test]
    fn admin_ids_parse_and_match() {
        let _guard = env_lock();
        env::set_var("ADMIN_IDS", "42, 99 ,");
        let config = Config::from_env().unwrap();
        env::remove_var("ADMIN_IDS");

        assert!(config.is_admin("42"));
        assert!(config.is_admin("99"));
        assert!(!config.is_admin("7"));
    }

    #[test]
    fn invalid_numeric_value_is_rejected() {
        let _guard = env_lock();
        env::set_var("CLAIM_AMOUNT", "lots");
        let result = Config::from_env();
        env::remove_var("CLAIM_AMOUNT");

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "CLAIM_AMOUNT",
                ..
            })
        ));
    }

    #[test]
    fn env_flag_accepts_common_truthy_values() {
        let _guard = env_lock();
        for value in ["1", "true", "YES"] {
            env::set_var("REAL_FAUCET_ENABLED", value);
            assert!(env_flag("REAL_FAUCET_ENABLED"), "value {value}");
        }
        env::set_var("REAL_FAUCET_ENABLED", "off");
        assert!(!env_flag("REAL_FAUCET_ENABLED"));
        env::remove_var("REAL_FAUCET_ENABLED");
    }
}
