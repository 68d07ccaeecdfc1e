use neo4rs::query;
use tracing::{info, warn};

use crate::GraphClient;

/// Uniqueness constraints for the account graph, one per node key.
pub const CONSTRAINTS: [&str; 3] = [
    "CREATE CONSTRAINT account_id_unique IF NOT EXISTS FOR (a:Account) REQUIRE a.account_id IS UNIQUE",
    "CREATE CONSTRAINT email_unique IF NOT EXISTS FOR (e:Email) REQUIRE e.address IS UNIQUE",
    "CREATE CONSTRAINT phone_unique IF NOT EXISTS FOR (p:Phone) REQUIRE p.number IS UNIQUE",
];

/// Run idempotent schema migrations. Safe to call on every load.
pub async fn migrate(client: &GraphClient) -> Result<(), neo4rs::Error> {
    let g = &client.graph;

    for c in &CONSTRAINTS {
        run_ignoring_exists(g, c).await?;
    }
    info!(count = CONSTRAINTS.len(), "Uniqueness constraints ensured");

    Ok(())
}

/// Run a Cypher statement, ignoring errors that indicate the constraint/index already exists.
async fn run_ignoring_exists(g: &neo4rs::Graph, cypher: &str) -> Result<(), neo4rs::Error> {
    match g.run(query(cypher)).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let msg = e.to_string().to_lowercase();
            if msg.contains("already exists") || msg.contains("equivalent") {
                warn!("Already exists (skipped): {}", cypher.chars().take(80).collect::<String>());
                Ok(())
            } else {
                Err(e)
            }
        }
    }
}
