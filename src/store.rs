//! Trade persistence behind a repository interface.
//!
//! The analyzer and HTTP layers never touch storage; callers load records,
//! run analysis, and save the result.

use crate::domain::trade::TradeRecord;
use crate::error::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Loads and saves the full journal.
pub trait TradeRepository {
    fn load(&self) -> Result<Vec<TradeRecord>, StoreError>;
    fn save(&self, trades: &[TradeRecord]) -> Result<(), StoreError>;
}

// ─── JSON file ───────────────────────────────────────────────────────────────

/// Journal stored as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TradeRepository for JsonFileRepository {
    /// A missing file is an empty journal.
    fn load(&self) -> Result<Vec<TradeRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No journal file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let trades: Vec<TradeRecord> = serde_json::from_str(&text)?;
        tracing::debug!(path = %self.path.display(), count = trades.len(), "Loaded trades");
        Ok(trades)
    }

    fn save(&self, trades: &[TradeRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(trades)?;
        fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), count = trades.len(), "Saved trades");
        Ok(())
    }
}

// ─── In-memory ───────────────────────────────────────────────────────────────

/// Process-local journal, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    trades: Mutex<Vec<TradeRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trades(trades: Vec<TradeRecord>) -> Self {
        Self {
            trades: Mutex::new(trades),
        }
    }
}

impl TradeRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<TradeRecord>, StoreError> {
        Ok(self
            .trades
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, trades: &[TradeRecord]) -> Result<(), StoreError> {
        *self.trades.lock().unwrap_or_else(PoisonError::into_inner) = trades.to_vec();
        Ok(())
    }
}
