//! Loads the accounts file into Neo4j and derives shared-identifier edges.
//!
//! Connection settings come from NEO4J_URI, NEO4J_USERNAME and NEO4J_PASSWORD.
//! The target database is wiped first unless `--keep-existing` is passed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fraudring_common::Config;
use fraudring_graph::{missing_input_message, read_input, GraphClient, Loader};

#[derive(Parser)]
#[command(name = "fraudring-load")]
#[command(about = "Load synthetic accounts into Neo4j and link shared emails/phones")]
#[command(version)]
struct Cli {
    /// Accounts CSV produced by fraudring-seed
    #[arg(short, long, default_value = "data/accounts.csv")]
    input: PathBuf,

    /// Skip the initial detach-delete of every node (WARNING: default wipes the database)
    #[arg(long)]
    keep_existing: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fraudring=info".parse()?))
        .init();

    let cli = Cli::parse();

    let Some(accounts) = read_input(&cli.input)? else {
        println!("{}", missing_input_message(&cli.input));
        return Ok(());
    };

    let config = Config::from_env();
    info!(uri = %config.neo4j_uri, user = %config.neo4j_user, "Connecting to Neo4j");
    let client = GraphClient::connect(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
        .await
        .with_context(|| format!("Failed to connect to Neo4j at {}", config.neo4j_uri))?;

    let summary = Loader::new(&client)
        .with_reset(!cli.keep_existing)
        .load(&accounts)
        .await?;

    println!();
    println!("{summary}");
    println!();
    println!("Done! View the graph at {}", config.browser_url);
    Ok(())
}
