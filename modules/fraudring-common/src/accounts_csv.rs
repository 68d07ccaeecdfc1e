//! Reading and writing the intermediate accounts file.
//!
//! ```csv
//! account_id,first_name,last_name,email,phone
//! ACC48213377,Mary,Smith,suspicious.user@fakemail.test,555-123-4567
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{Account, FraudRingError, CSV_HEADER};

/// Write `accounts` to `path`, replacing any existing file.
pub fn write_accounts(path: &Path, accounts: &[Account]) -> Result<(), FraudRingError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for account in accounts {
        writer.serialize(account)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = accounts.len(), "Wrote accounts file");
    Ok(())
}

/// Read every account row from `path`.
///
/// A missing file is reported as [`FraudRingError::MissingInput`] so callers can
/// tell it apart from a malformed one.
pub fn read_accounts(path: &Path) -> Result<Vec<Account>, FraudRingError> {
    if !path.exists() {
        return Err(FraudRingError::MissingInput(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    for column in CSV_HEADER {
        if !headers.iter().any(|h| h == column) {
            return Err(FraudRingError::MissingColumn(column.to_string()));
        }
    }

    let accounts = reader
        .deserialize::<Account>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!(path = %path.display(), rows = accounts.len(), "Read accounts file");
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, email: &str, phone: &str) -> Account {
        Account {
            account_id: id.into(),
            first_name: "Mary".into(),
            last_name: "O'Neil, Jr.".into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    #[test]
    fn written_file_starts_with_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        write_accounts(&path, &[account("ACC00000001", "x@y", "1")]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("account_id,first_name,last_name,email,phone")
        );
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn names_with_delimiters_survive_a_reread() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        let rows = vec![account("ACC00000001", "x@y", "1"), account("ACC00000002", "x@y", "2")];
        write_accounts(&path, &rows).unwrap();

        assert_eq!(read_accounts(&path).unwrap(), rows);
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("accounts.csv");
        write_accounts(&path, &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        fs::write(&path, "stale contents\nmore\nand more\n").unwrap();

        write_accounts(&path, &[account("ACC00000001", "x@y", "1")]).unwrap();
        assert_eq!(read_accounts(&path).unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_its_own_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = read_accounts(&path).unwrap_err();
        assert!(matches!(err, FraudRingError::MissingInput(p) if p == path));
    }

    #[test]
    fn missing_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        fs::write(&path, "account_id,first_name,last_name,email\nACC1,a,b,c\n").unwrap();

        let err = read_accounts(&path).unwrap_err();
        assert!(matches!(err, FraudRingError::MissingColumn(c) if c == "phone"));
    }
}
