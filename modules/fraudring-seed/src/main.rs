//! Writes the synthetic fraud-ring accounts file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use fraudring_seed::seed_file;

#[derive(Parser)]
#[command(name = "fraudring-seed")]
#[command(about = "Generate synthetic accounts with planted shared emails and phones")]
#[command(version)]
struct Cli {
    /// Where to write the accounts CSV (overwritten if present)
    #[arg(short, long, default_value = "data/accounts.csv")]
    output: PathBuf,

    /// Seed for a reproducible dataset; random when omitted
    #[arg(long, env = "FRAUDRING_SEED")]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fraudring=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let report = seed_file(&cli.output, &mut rng)?;
    println!("{report}");
    Ok(())
}
