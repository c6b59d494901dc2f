//! Tally Core - a pocket bank and note keeper
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Core entities (Account, Note, Todo, User, ...)
//! - **ports**: Trait definitions for storage (BalanceStore, DocumentStore)
//! - **services**: Flow orchestration (bank, notes, profit, event log)
//! - **adapters**: Concrete storage (text file, JSON files, memory)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use adapters::{JsonFileStore, TextBalanceStore};
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Account, Admin, Document, Financials, JsonKeyStyle, Note, ProfitInputs, Todo, User};
pub use services::{EntryPoint, LoggingService, Outcome};

/// Main context for Tally operations
///
/// Holds the resolved configuration and the services wired to the data
/// directory.
pub struct TallyContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub bank_service: BankService,
    pub note_service: NoteService,
    pub profit_service: ProfitService,
}

impl TallyContext {
    /// Create a new Tally context rooted at `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let config = Config::load(data_dir).context("Failed to load settings")?;

        let balance_store = TextBalanceStore::new(config.balance_path(data_dir));
        let bank_service = BankService::open(Box::new(balance_store), config.default_balance);

        let document_store =
            JsonFileStore::new(config.notes_path(data_dir)).pretty(config.pretty_json);
        let note_service = NoteService::new(Box::new(document_store), config.json_keys);

        let profit_service = ProfitService::new(data_dir.to_path_buf());

        Ok(Self {
            config,
            data_dir: data_dir.to_path_buf(),
            bank_service,
            note_service,
            profit_service,
        })
    }
}
