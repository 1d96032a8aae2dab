// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solana collaborator: address validation, balance queries and the
//! optional real faucet disbursement.
//!
//! The ledger core never depends on this module for correctness. A
//! failed transfer surfaces to the caller and leaves ledger state
//! untouched; no retry happens here.

use std::str::FromStr;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_instruction,
    transaction::Transaction,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ApiError, LedgerError};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Debug, Error)]
pub enum SolanaError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("RPC request failed: {0}")]
    Rpc(String),
    #[error("real faucet is disabled")]
    Disabled,
}

impl From<SolanaError> for ApiError {
    fn from(err: SolanaError) -> Self {
        match err {
            SolanaError::InvalidAddress(msg) => {
                ApiError::from(LedgerError::InvalidAddress(msg))
            }
            SolanaError::Rpc(msg) => ApiError::from(LedgerError::Disbursement(msg)),
            SolanaError::Disabled => ApiError::from(LedgerError::FeatureDisabled("real faucet")),
        }
    }
}

/// Syntactic address validation.
pub fn validate_address(address: &str) -> Result<Pubkey, SolanaError> {
    Pubkey::from_str(address).map_err(|_| SolanaError::InvalidAddress(address.to_string()))
}

pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64) as u64
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// RPC client plus the optional funding keypair.
pub struct SolanaGateway {
    rpc: RpcClient,
    funding: Option<Keypair>,
    faucet_amount_sol: f64,
}

impl SolanaGateway {
    /// Build the gateway from configuration.
    ///
    /// A missing or unparseable funding keypair disables the real
    /// faucet with a warning; it never prevents startup.
    pub fn from_config(config: &Config) -> Self {
        let funding = if config.real_faucet_enabled {
            match config.funding_keypair_json.as_deref() {
                Some(raw) => match parse_keypair(raw) {
                    Ok(keypair) => {
                        info!(address = %keypair.pubkey(), "Loaded funding keypair, real faucet enabled");
                        Some(keypair)
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to load funding keypair, real faucet disabled");
                        None
                    }
                },
                None => {
                    warn!("REAL_FAUCET_ENABLED set but FUNDING_KEYPAIR_JSON missing, real faucet disabled");
                    None
                }
            }
        } else {
            None
        };

        Self {
            rpc: RpcClient::new(config.rpc_url.clone()),
            funding,
            faucet_amount_sol: config.faucet_amount_sol,
        }
    }

    /// Whether real disbursement is available.
    pub fn faucet_enabled(&self) -> bool {
        self.funding.is_some()
    }

    pub fn faucet_amount_sol(&self) -> f64 {
        self.faucet_amount_sol
    }

    /// Balance of an address in SOL.
    pub async fn get_balance_sol(&self, address: &Pubkey) -> Result<f64, SolanaError> {
        let lamports = self
            .rpc
            .get_balance(address)
            .await
            .map_err(|e| SolanaError::Rpc(format!("failed to get balance: {e}")))?;
        Ok(lamports_to_sol(lamports))
    }

    /// Send the fixed faucet amount from the funding wallet.
    ///
    /// Returns the transaction signature on success.
    pub async fn send_faucet(&self, destination: &Pubkey) -> Result<Signature, SolanaError> {
        let funding = self.funding.as_ref().ok_or(SolanaError::Disabled)?;
        let lamports = sol_to_lamports(self.faucet_amount_sol);

        let instruction =
            system_instruction::transfer(&funding.pubkey(), destination, lamports);

        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| SolanaError::Rpc(format!("failed to get blockhash: {e}")))?;

        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&funding.pubkey()),
            &[funding],
            blockhash,
        );

        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|e| SolanaError::Rpc(format!("transfer failed: {e}")))?;

        info!(%destination, lamports, %signature, "Faucet disbursement sent");
        Ok(signature)
    }
}

/// Parse a keypair from the JSON byte-array format used by the Solana
/// CLI (`[12, 34, ...]`, 64 bytes).
fn parse_keypair(raw: &str) -> Result<Keypair, String> {
    let bytes: Vec<u8> =
        serde_json::from_str(raw).map_err(|e| format!("not a JSON byte array: {e}"))?;
    Keypair::from_bytes(&bytes).map_err(|e| format!("not a valid keypair: {e}"))
}
