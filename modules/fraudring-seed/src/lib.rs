pub mod generator;
pub mod identity;
pub mod names;

pub use generator::{generate_accounts, seed_file, SeedReport};
