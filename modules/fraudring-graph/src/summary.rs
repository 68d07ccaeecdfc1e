use std::fmt;

use fraudring_common::{GraphCounts, SharedIdentifier};

/// What a load run wrote and what the graph looks like afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows read from the input file and upserted.
    pub rows_loaded: usize,
    /// Sharing pairs matched by each derivation step.
    pub email_pairs: i64,
    pub phone_pairs: i64,
    pub total_accounts: i64,
    pub shared_emails: Vec<SharedIdentifier>,
    pub shared_phones: Vec<SharedIdentifier>,
    pub counts: GraphCounts,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Total accounts: {}", self.total_accounts)?;
        writeln!(f, "  Shared emails: {}", self.shared_emails.len())?;
        for s in &self.shared_emails {
            writeln!(f, "    - {}: {} accounts", s.value, s.owners)?;
        }
        write!(f, "  Shared phones: {}", self.shared_phones.len())?;
        for s in &self.shared_phones {
            write!(f, "\n    - {}: {} accounts", s.value, s.owners)?;
        }
        Ok(())
    }
}
