// Storage seam for the loader.
//
// AccountStore covers every statement a load run issues: wipe, schema,
// per-row upsert, pair derivation, and the read-only summary queries.
// GraphClient implements it with Cypher MERGE; MemoryAccountStore implements
// the same merge-on-value contract with maps, so loader tests need no Docker.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use neo4rs::{query, Query};

use fraudring_common::{Account, GraphCounts, IdentifierKind, ShareEdge, SharedIdentifier};

use crate::{migrate, GraphClient};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Delete every node and relationship.
    async fn wipe(&self) -> Result<()>;

    /// Declare the uniqueness constraints on Account, Email and Phone keys.
    async fn ensure_constraints(&self) -> Result<()>;

    /// Upsert one account with its email, phone and both ownership edges.
    /// Name fields are overwritten when the account already exists.
    async fn upsert_account(&self, account: &Account) -> Result<()>;

    /// Derive one co-occurrence edge per pair of accounts owning the same
    /// identifier node, directed from the smaller account id to the larger.
    /// Returns the number of sharing pairs found.
    async fn link_shared(&self, kind: IdentifierKind) -> Result<i64>;

    async fn count_accounts(&self) -> Result<i64>;

    /// Identifier values owned by more than one account, most owners first.
    async fn shared_identifiers(&self, kind: IdentifierKind) -> Result<Vec<SharedIdentifier>>;

    /// Number of accounts owning the identifier node with this value.
    async fn owner_count(&self, kind: IdentifierKind, value: &str) -> Result<i64>;

    /// Derived edges of one kind, ordered by (from, to).
    async fn share_edges(&self, kind: IdentifierKind) -> Result<Vec<ShareEdge>>;

    async fn graph_counts(&self) -> Result<GraphCounts>;
}

// ---------------------------------------------------------------------------
// Neo4j
// ---------------------------------------------------------------------------

impl GraphClient {
    /// Run a query whose single row carries an integer column `cnt`.
    async fn scalar(&self, q: Query) -> Result<i64> {
        let mut stream = self.graph.execute(q).await?;
        let row = stream
            .next()
            .await?
            .ok_or_else(|| anyhow!("count query returned no rows"))?;
        Ok(row.get::<i64>("cnt")?)
    }

    async fn count_label(&self, label: &str) -> Result<i64> {
        self.scalar(query(&format!("MATCH (n:{label}) RETURN count(n) AS cnt")))
            .await
    }

    async fn count_rel(&self, from: &str, rel: &str, to: &str) -> Result<i64> {
        self.scalar(query(&format!(
            "MATCH (:{from})-[r:{rel}]->(:{to}) RETURN count(r) AS cnt"
        )))
        .await
    }
}

#[async_trait]
impl AccountStore for GraphClient {
    async fn wipe(&self) -> Result<()> {
        self.graph.run(query("MATCH (n) DETACH DELETE n")).await?;
        Ok(())
    }

    async fn ensure_constraints(&self) -> Result<()> {
        migrate::migrate(self).await?;
        Ok(())
    }

    async fn upsert_account(&self, account: &Account) -> Result<()> {
        let q = query(
            "MERGE (a:Account {account_id: $account_id})
             SET a.first_name = $first_name, a.last_name = $last_name
             MERGE (e:Email {address: $email})
             MERGE (a)-[:HAS_EMAIL]->(e)
             MERGE (p:Phone {number: $phone})
             MERGE (a)-[:HAS_PHONE]->(p)",
        )
        .param("account_id", account.account_id.as_str())
        .param("first_name", account.first_name.as_str())
        .param("last_name", account.last_name.as_str())
        .param("email", account.email.as_str())
        .param("phone", account.phone.as_str());

        self.graph.run(q).await?;
        Ok(())
    }

    async fn link_shared(&self, kind: IdentifierKind) -> Result<i64> {
        let (label, key) = (kind.label(), kind.key());
        let (owns, shares, prop) = (kind.owner_rel(), kind.share_rel(), kind.share_prop());
        let q = query(&format!(
            "MATCH (a:Account)-[:{owns}]->(n:{label})<-[:{owns}]-(b:Account)
             WHERE a.account_id < b.account_id
             MERGE (a)-[r:{shares} {{{prop}: n.{key}}}]->(b)
             RETURN count(r) AS cnt"
        ));
        self.scalar(q).await
    }

    async fn count_accounts(&self) -> Result<i64> {
        self.count_label("Account").await
    }

    async fn shared_identifiers(&self, kind: IdentifierKind) -> Result<Vec<SharedIdentifier>> {
        let (label, key, owns) = (kind.label(), kind.key(), kind.owner_rel());
        let q = query(&format!(
            "MATCH (n:{label})<-[:{owns}]-(a:Account)
             WITH n, count(a) AS cnt WHERE cnt > 1
             RETURN n.{key} AS value, cnt
             ORDER BY cnt DESC, value ASC"
        ));

        let mut shared = Vec::new();
        let mut stream = self.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            shared.push(SharedIdentifier {
                value: row.get("value")?,
                owners: row.get("cnt")?,
            });
        }
        Ok(shared)
    }

    async fn owner_count(&self, kind: IdentifierKind, value: &str) -> Result<i64> {
        let (label, key, owns) = (kind.label(), kind.key(), kind.owner_rel());
        let q = query(&format!(
            "OPTIONAL MATCH (n:{label} {{{key}: $value}})<-[:{owns}]-(a:Account)
             RETURN count(a) AS cnt"
        ))
        .param("value", value);
        self.scalar(q).await
    }

    async fn share_edges(&self, kind: IdentifierKind) -> Result<Vec<ShareEdge>> {
        let (shares, prop) = (kind.share_rel(), kind.share_prop());
        let q = query(&format!(
            "MATCH (a:Account)-[r:{shares}]->(b:Account)
             RETURN a.account_id AS source, b.account_id AS target, r.{prop} AS value
             ORDER BY source, target"
        ));

        let mut edges = Vec::new();
        let mut stream = self.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            edges.push(ShareEdge {
                from: row.get("source")?,
                to: row.get("target")?,
                value: row.get("value")?,
            });
        }
        Ok(edges)
    }

    async fn graph_counts(&self) -> Result<GraphCounts> {
        use IdentifierKind::{Email, Phone};

        Ok(GraphCounts {
            accounts: self.count_label("Account").await?,
            emails: self.count_label(Email.label()).await?,
            phones: self.count_label(Phone.label()).await?,
            has_email: self.count_rel("Account", Email.owner_rel(), Email.label()).await?,
            has_phone: self.count_rel("Account", Phone.owner_rel(), Phone.label()).await?,
            shares_email: self.count_rel("Account", Email.share_rel(), "Account").await?,
            shares_phone: self.count_rel("Account", Phone.share_rel(), "Account").await?,
        })
    }
}
