pub mod client;
pub mod loader;
pub mod memory;
pub mod migrate;
pub mod store;
pub mod summary;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use client::GraphClient;
pub use loader::{missing_input_message, read_input, LoadError, LoadOutcome, Loader};
pub use memory::MemoryAccountStore;
pub use neo4rs::query;
pub use store::AccountStore;
pub use summary::LoadSummary;
