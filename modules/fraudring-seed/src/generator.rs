use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use fraudring_common::accounts_csv::write_accounts;
use fraudring_common::{
    Account, FraudRingError, SHARED_EMAIL_A, SHARED_EMAIL_B, SHARED_PHONE_A, SHARED_PHONE_B,
};

use crate::identity;

/// Accounts sharing email A.
pub const EMAIL_RING_A: usize = 20;
/// Leading members of the email A ring that also share phone A.
pub const PHONE_RING_A: usize = 15;
/// Accounts sharing email B.
pub const EMAIL_RING_B: usize = 8;
/// Accounts sharing phone B, each with its own email.
pub const PHONE_RING_B: usize = 5;
/// Accounts with no shared identifiers.
pub const NORMAL_ACCOUNTS: usize = 67;

pub const TOTAL_ACCOUNTS: usize =
    EMAIL_RING_A + EMAIL_RING_B + PHONE_RING_B + NORMAL_ACCOUNTS;

/// Builds accounts while tracking every id, email and phone handed out so far.
///
/// The planted shared values are reserved up front, so a randomly drawn
/// identifier can never join a ring by accident.
struct AccountFactory<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    used_ids: HashSet<String>,
    used_emails: HashSet<String>,
    used_phones: HashSet<String>,
}

impl<'r, R: Rng + ?Sized> AccountFactory<'r, R> {
    fn new(rng: &'r mut R) -> Self {
        Self {
            rng,
            used_ids: HashSet::new(),
            used_emails: [SHARED_EMAIL_A, SHARED_EMAIL_B].map(String::from).into(),
            used_phones: [SHARED_PHONE_A, SHARED_PHONE_B].map(String::from).into(),
        }
    }

    fn unique_id(&mut self) -> String {
        loop {
            let id = identity::account_id(&mut *self.rng);
            if self.used_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    fn fresh_email(&mut self, first: &str, last: &str) -> String {
        loop {
            let email = identity::email(&mut *self.rng, first, last);
            if self.used_emails.insert(email.clone()) {
                return email;
            }
        }
    }

    fn fresh_phone(&mut self) -> String {
        loop {
            let phone = identity::phone(&mut *self.rng);
            if self.used_phones.insert(phone.clone()) {
                return phone;
            }
        }
    }

    /// One account. `None` means "draw a fresh value".
    fn account(&mut self, email: Option<&str>, phone: Option<&str>) -> Account {
        let (first, last) = identity::name(&mut *self.rng);
        let account_id = self.unique_id();
        let email = match email {
            Some(shared) => shared.to_string(),
            None => self.fresh_email(first, last),
        };
        let phone = match phone {
            Some(shared) => shared.to_string(),
            None => self.fresh_phone(),
        };

        Account {
            account_id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email,
            phone,
        }
    }
}

/// Generate the full synthetic dataset, shuffled so rings are not contiguous.
pub fn generate_accounts<R: Rng + ?Sized>(rng: &mut R) -> Vec<Account> {
    let mut accounts = Vec::with_capacity(TOTAL_ACCOUNTS);
    {
        let mut factory = AccountFactory::new(&mut *rng);

        for i in 0..EMAIL_RING_A {
            let phone = (i < PHONE_RING_A).then_some(SHARED_PHONE_A);
            accounts.push(factory.account(Some(SHARED_EMAIL_A), phone));
        }
        for _ in 0..EMAIL_RING_B {
            accounts.push(factory.account(Some(SHARED_EMAIL_B), None));
        }
        for _ in 0..PHONE_RING_B {
            accounts.push(factory.account(None, Some(SHARED_PHONE_B)));
        }
        for _ in 0..NORMAL_ACCOUNTS {
            accounts.push(factory.account(None, None));
        }
    }

    accounts.shuffle(rng);
    accounts
}

/// Outcome of [`seed_file`], printed by the binary.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub path: PathBuf,
    pub total: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated {} accounts to {}", self.total, self.path.display())?;
        writeln!(f, "  - {EMAIL_RING_A} accounts share email: {SHARED_EMAIL_A}")?;
        writeln!(f, "  - {PHONE_RING_A} of those also share phone: {SHARED_PHONE_A}")?;
        writeln!(f, "  - {EMAIL_RING_B} accounts share email: {SHARED_EMAIL_B}")?;
        writeln!(f, "  - {PHONE_RING_B} separate accounts share phone: {SHARED_PHONE_B}")?;
        write!(f, "  - {NORMAL_ACCOUNTS} normal accounts with unique emails/phones")
    }
}

/// Generate a dataset and write it to `path`, overwriting any existing file.
pub fn seed_file<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<SeedReport, FraudRingError> {
    let accounts = generate_accounts(rng);
    write_accounts(path, &accounts)?;
    info!(path = %path.display(), accounts = accounts.len(), "Seed data written");

    Ok(SeedReport {
        path: path.to_path_buf(),
        total: accounts.len(),
    })
}
