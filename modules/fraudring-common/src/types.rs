use std::fmt;

use serde::{Deserialize, Serialize};

// --- Planted fraud signals ---

/// Email shared by every account in the large ring (group A).
pub const SHARED_EMAIL_A: &str = "suspicious.user@fakemail.test";
/// Email shared by the smaller ring (group B).
pub const SHARED_EMAIL_B: &str = "fraud.ring@notreal.example";
/// Phone shared by the first 15 accounts of group A.
pub const SHARED_PHONE_A: &str = "555-123-4567";
/// Phone shared by group C, disjoint from both email rings.
pub const SHARED_PHONE_B: &str = "555-987-6543";

/// Prefix of every generated account id.
pub const ACCOUNT_ID_PREFIX: &str = "ACC";
/// Number of random digits following [`ACCOUNT_ID_PREFIX`].
pub const ACCOUNT_ID_DIGITS: usize = 8;

/// Column order of the intermediate accounts file.
pub const CSV_HEADER: [&str; 5] = ["account_id", "first_name", "last_name", "email", "phone"];

// --- Records ---

/// One synthetic account, exactly as it appears in the intermediate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Account {
    pub fn identifier(&self, kind: IdentifierKind) -> &str {
        match kind {
            IdentifierKind::Email => &self.email,
            IdentifierKind::Phone => &self.phone,
        }
    }
}

// --- Graph vocabulary ---

/// The two identifier kinds an account owns. Each maps onto its own node label,
/// ownership edge and derived co-occurrence edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentifierKind {
    Email,
    Phone,
}

impl IdentifierKind {
    pub const ALL: [IdentifierKind; 2] = [IdentifierKind::Email, IdentifierKind::Phone];

    /// Node label.
    pub fn label(self) -> &'static str {
        match self {
            IdentifierKind::Email => "Email",
            IdentifierKind::Phone => "Phone",
        }
    }

    /// Unique key property on the identifier node.
    pub fn key(self) -> &'static str {
        match self {
            IdentifierKind::Email => "address",
            IdentifierKind::Phone => "number",
        }
    }

    /// Account -> identifier relationship type.
    pub fn owner_rel(self) -> &'static str {
        match self {
            IdentifierKind::Email => "HAS_EMAIL",
            IdentifierKind::Phone => "HAS_PHONE",
        }
    }

    /// Account -> account relationship type derived from a shared identifier.
    pub fn share_rel(self) -> &'static str {
        match self {
            IdentifierKind::Email => "SHARES_EMAIL",
            IdentifierKind::Phone => "SHARES_PHONE",
        }
    }

    /// Property on the derived edge holding the shared value.
    pub fn share_prop(self) -> &'static str {
        match self {
            IdentifierKind::Email => "email",
            IdentifierKind::Phone => "phone",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::Email => write!(f, "email"),
            IdentifierKind::Phone => write!(f, "phone"),
        }
    }
}

/// An email or phone value owned by more than one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedIdentifier {
    pub value: String,
    pub owners: i64,
}

/// A derived co-occurrence edge. `from` always sorts before `to`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareEdge {
    pub from: String,
    pub to: String,
    pub value: String,
}

/// Node and relationship totals, used to compare two load runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    pub accounts: i64,
    pub emails: i64,
    pub phones: i64,
    pub has_email: i64,
    pub has_phone: i64,
    pub shares_email: i64,
    pub shares_phone: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_picks_matching_field() {
        let a = Account {
            account_id: "ACC00000001".into(),
            first_name: "Mary".into(),
            last_name: "Smith".into(),
            email: "x@y".into(),
            phone: "1".into(),
        };
        assert_eq!(a.identifier(IdentifierKind::Email), "x@y");
        assert_eq!(a.identifier(IdentifierKind::Phone), "1");
    }

    #[test]
    fn phone_vocabulary_is_consistent() {
        let k = IdentifierKind::Phone;
        assert_eq!(k.label(), "Phone");
        assert_eq!(k.key(), "number");
        assert_eq!(k.owner_rel(), "HAS_PHONE");
        assert_eq!(k.share_rel(), "SHARES_PHONE");
        assert_eq!(k.share_prop(), "phone");
    }

    #[test]
    fn planted_phones_sit_outside_generated_exchange_range() {
        // Generated exchanges start at 200, so phone A can never be produced randomly.
        let exchange: u32 = SHARED_PHONE_A.split('-').nth(1).unwrap().parse().unwrap();
        assert!(exchange < 200);
    }
}
