use std::env;

/// Connection settings loaded from environment variables.
///
/// Every value has a default pointing at a local development Neo4j.
#[derive(Debug, Clone)]
pub struct Config {
    // Neo4j
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,

    // Neo4j Browser, printed after a load
    pub browser_url: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        Self {
            neo4j_uri: var("NEO4J_URI", "bolt://localhost:7687"),
            neo4j_user: var("NEO4J_USERNAME", "neo4j"),
            neo4j_password: var("NEO4J_PASSWORD", "password"),
            browser_url: var("NEO4J_BROWSER_URL", "http://localhost:7474"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_point_at_local_neo4j() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.neo4j_uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j_user, "neo4j");
        assert_eq!(config.neo4j_password, "password");
        assert_eq!(config.browser_url, "http://localhost:7474");
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("NEO4J_URI", "bolt://graph:7687"),
            ("NEO4J_USERNAME", "loader"),
            ("NEO4J_PASSWORD", "s3cret"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.neo4j_uri, "bolt://graph:7687");
        assert_eq!(config.neo4j_user, "loader");
        assert_eq!(config.neo4j_password, "s3cret");
        assert_eq!(config.browser_url, "http://localhost:7474");
    }
}
