use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use fraudring_common::accounts_csv::read_accounts;
use fraudring_common::{Account, FraudRingError, IdentifierKind};

use crate::{AccountStore, LoadSummary};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input error: {0}")]
    Input(#[from] FraudRingError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Result of [`Loader::load_path`].
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(LoadSummary),
    /// The input file does not exist. Nothing was sent to the store.
    MissingInput(PathBuf),
}

/// Read the accounts file, or `Ok(None)` when it does not exist.
pub fn read_input(path: &Path) -> Result<Option<Vec<Account>>, LoadError> {
    match read_accounts(path) {
        Ok(accounts) => Ok(Some(accounts)),
        Err(FraudRingError::MissingInput(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Console text for a missing input file.
pub fn missing_input_message(path: &Path) -> String {
    format!(
        "CSV file not found: {}\nRun 'fraudring-seed' first to generate the data.",
        path.display()
    )
}

/// Rebuilds the account graph from a list of rows.
///
/// Steps run strictly in order, each awaiting the store before the next:
/// reset, constraints, per-row upsert, pair derivation, summary.
pub struct Loader<'s, S: AccountStore + ?Sized> {
    store: &'s S,
    reset: bool,
}

impl<'s, S: AccountStore + ?Sized> Loader<'s, S> {
    /// A loader that wipes the store before writing.
    pub fn new(store: &'s S) -> Self {
        Self { store, reset: true }
    }

    /// Whether to detach-delete everything before loading.
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Load the file at `path`. A missing file is checked before any store call.
    pub async fn load_path(&self, path: &Path) -> Result<LoadOutcome, LoadError> {
        match read_input(path)? {
            Some(accounts) => Ok(LoadOutcome::Loaded(self.load(&accounts).await?)),
            None => Ok(LoadOutcome::MissingInput(path.to_path_buf())),
        }
    }

    pub async fn load(&self, accounts: &[Account]) -> Result<LoadSummary, LoadError> {
        if self.reset {
            self.store.wipe().await?;
            info!("Cleared existing data");
        } else {
            info!("Keeping existing data");
        }

        self.store.ensure_constraints().await?;
        info!("Created constraints");

        for account in accounts {
            self.store.upsert_account(account).await?;
        }
        info!("Loaded {} accounts", accounts.len());

        let email_pairs = self.store.link_shared(IdentifierKind::Email).await?;
        let phone_pairs = self.store.link_shared(IdentifierKind::Phone).await?;
        info!(email_pairs, phone_pairs, "Created SHARES_EMAIL and SHARES_PHONE relationships");

        let total_accounts = self.store.count_accounts().await?;
        let shared_emails = self.store.shared_identifiers(IdentifierKind::Email).await?;
        let shared_phones = self.store.shared_identifiers(IdentifierKind::Phone).await?;
        let counts = self.store.graph_counts().await?;
        debug!(?counts, "Graph totals after load");

        Ok(LoadSummary {
            rows_loaded: accounts.len(),
            email_pairs,
            phone_pairs,
            total_accounts,
            shared_emails,
            shared_phones,
            counts,
        })
    }
}
