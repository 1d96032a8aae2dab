// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-backed ledger store.
//!
//! The whole ledger is one JSON document (`users` + `withdrawals`)
//! mirrored to a single file. Loading an absent or unreadable document
//! yields an empty default; saving goes through a temp file + rename so
//! a crash mid-write never leaves a truncated document behind.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::models::LedgerState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable home of the ledger document.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state.
    ///
    /// Returns the empty default when the file does not exist or cannot
    /// be parsed. A corrupt document is logged, not raised; the caller
    /// starts from a fresh ledger rather than refusing to serve.
    pub fn load(&self) -> LedgerState {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LedgerState::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to open ledger file, starting empty");
                return LedgerState::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ledger file is corrupt, starting empty");
                LedgerState::default()
            }
        }
    }

    /// Persist the state (atomic write via rename).
    ///
    /// A failed save means the mutation is not durable; callers must
    /// not treat it as committed.
    pub fn save(&self, state: &LedgerState) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, state)?;
            writer.flush()?;
        }
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
