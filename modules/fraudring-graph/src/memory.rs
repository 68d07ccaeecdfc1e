//! In-memory [`AccountStore`] for tests. No database, no Docker.
//!
//! Mirrors the Cypher statements issued by [`GraphClient`](crate::GraphClient):
//! nodes are keyed maps, edges are ordered sets, so every upsert is a
//! lookup-or-insert and re-running a statement never duplicates anything.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;

use fraudring_common::{Account, GraphCounts, IdentifierKind, ShareEdge, SharedIdentifier};

use crate::AccountStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNode {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Default)]
struct State {
    constraints: bool,
    accounts: BTreeMap<String, AccountNode>,
    /// Identifier nodes per kind, keyed by value.
    identifiers: HashMap<IdentifierKind, BTreeSet<String>>,
    /// Ownership edges per kind as (account_id, value).
    owned: HashMap<IdentifierKind, BTreeSet<(String, String)>>,
    shares: HashMap<IdentifierKind, BTreeSet<ShareEdge>>,
}

impl State {
    /// Owner ids per identifier value, each list sorted ascending.
    fn owners_by_value(&self, kind: IdentifierKind) -> BTreeMap<&str, Vec<&str>> {
        let mut by_value: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (account_id, value) in self.owned.get(&kind).into_iter().flatten() {
            by_value.entry(value).or_default().push(account_id);
        }
        for owners in by_value.values_mut() {
            owners.sort_unstable();
        }
        by_value
    }
}

/// Thread-safe in-memory account graph. Counts every store call so tests can
/// assert that nothing touched the store.
#[derive(Default)]
pub struct MemoryAccountStore {
    state: Mutex<State>,
    operations: AtomicUsize,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls issued so far, reads included.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    pub fn constraints_declared(&self) -> bool {
        self.state.lock().unwrap().constraints
    }

    pub fn account(&self, account_id: &str) -> Option<AccountNode> {
        self.state.lock().unwrap().accounts.get(account_id).cloned()
    }

    fn begin(&self) -> MutexGuard<'_, State> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn wipe(&self) -> Result<()> {
        let mut state = self.begin();
        let constraints = state.constraints;
        // Constraints are schema, not data: they survive a detach-delete.
        *state = State {
            constraints,
            ..State::default()
        };
        Ok(())
    }

    async fn ensure_constraints(&self) -> Result<()> {
        self.begin().constraints = true;
        Ok(())
    }

    async fn upsert_account(&self, account: &Account) -> Result<()> {
        let mut state = self.begin();
        state.accounts.insert(
            account.account_id.clone(),
            AccountNode {
                first_name: account.first_name.clone(),
                last_name: account.last_name.clone(),
            },
        );
        for kind in IdentifierKind::ALL {
            let value = account.identifier(kind).to_string();
            state
                .identifiers
                .entry(kind)
                .or_default()
                .insert(value.clone());
            state
                .owned
                .entry(kind)
                .or_default()
                .insert((account.account_id.clone(), value));
        }
        Ok(())
    }

    async fn link_shared(&self, kind: IdentifierKind) -> Result<i64> {
        let mut state = self.begin();

        let mut pairs = Vec::new();
        for (value, owners) in state.owners_by_value(kind) {
            for (i, from) in owners.iter().enumerate() {
                for to in &owners[i + 1..] {
                    pairs.push(ShareEdge {
                        from: from.to_string(),
                        to: to.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        let found = pairs.len() as i64;
        state.shares.entry(kind).or_default().extend(pairs);
        Ok(found)
    }

    async fn count_accounts(&self) -> Result<i64> {
        Ok(self.begin().accounts.len() as i64)
    }

    async fn shared_identifiers(&self, kind: IdentifierKind) -> Result<Vec<SharedIdentifier>> {
        let state = self.begin();
        let mut shared: Vec<SharedIdentifier> = state
            .owners_by_value(kind)
            .into_iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(value, owners)| SharedIdentifier {
                value: value.to_string(),
                owners: owners.len() as i64,
            })
            .collect();
        shared.sort_by(|a, b| b.owners.cmp(&a.owners).then_with(|| a.value.cmp(&b.value)));
        Ok(shared)
    }

    async fn owner_count(&self, kind: IdentifierKind, value: &str) -> Result<i64> {
        let state = self.begin();
        let count = state
            .owned
            .get(&kind)
            .into_iter()
            .flatten()
            .filter(|(_, v)| v == value)
            .count();
        Ok(count as i64)
    }

    async fn share_edges(&self, kind: IdentifierKind) -> Result<Vec<ShareEdge>> {
        let state = self.begin();
        Ok(state
            .shares
            .get(&kind)
            .map(|edges| edges.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn graph_counts(&self) -> Result<GraphCounts> {
        use IdentifierKind::{Email, Phone};

        let state = self.begin();
        let nodes = |k: IdentifierKind| state.identifiers.get(&k).map_or(0, |s| s.len() as i64);
        let owned = |k: IdentifierKind| state.owned.get(&k).map_or(0, |s| s.len() as i64);
        let shares = |k: IdentifierKind| state.shares.get(&k).map_or(0, |s| s.len() as i64);

        Ok(GraphCounts {
            accounts: state.accounts.len() as i64,
            emails: nodes(Email),
            phones: nodes(Phone),
            has_email: owned(Email),
            has_phone: owned(Phone),
            shares_email: shares(Email),
            shares_phone: shares(Phone),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, email: &str, phone: &str) -> Account {
        Account {
            account_id: id.into(),
            first_name: "Mary".into(),
            last_name: "Smith".into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    #[tokio::test]
    async fn duplicate_values_reuse_one_node() {
        let store = MemoryAccountStore::new();
        store.upsert_account(&account("ACC1", "x@y", "1")).await.unwrap();
        store.upsert_account(&account("ACC2", "x@y", "2")).await.unwrap();

        let counts = store.graph_counts().await.unwrap();
        assert_eq!(counts.emails, 1);
        assert_eq!(counts.phones, 2);
        assert_eq!(counts.has_email, 2);
        assert_eq!(store.owner_count(IdentifierKind::Email, "x@y").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn upsert_updates_names_without_duplicating_edges() {
        let store = MemoryAccountStore::new();
        store.upsert_account(&account("ACC1", "x@y", "1")).await.unwrap();

        let mut renamed = account("ACC1", "x@y", "1");
        renamed.first_name = "Maria".into();
        store.upsert_account(&renamed).await.unwrap();

        assert_eq!(store.account("ACC1").unwrap().first_name, "Maria");
        let counts = store.graph_counts().await.unwrap();
        assert_eq!(counts.accounts, 1);
        assert_eq!(counts.has_email, 1);
        assert_eq!(counts.has_phone, 1);
    }

    #[tokio::test]
    async fn wipe_keeps_constraints() {
        let store = MemoryAccountStore::new();
        store.ensure_constraints().await.unwrap();
        store.upsert_account(&account("ACC1", "x@y", "1")).await.unwrap();
        store.wipe().await.unwrap();

        assert!(store.constraints_declared());
        assert_eq!(store.graph_counts().await.unwrap(), GraphCounts::default());
    }

    #[tokio::test]
    async fn unknown_value_has_no_owners() {
        let store = MemoryAccountStore::new();
        assert_eq!(store.owner_count(IdentifierKind::Phone, "555").await.unwrap(), 0);
        assert_eq!(store.operations(), 1);
    }
}
