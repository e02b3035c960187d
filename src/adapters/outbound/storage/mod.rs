// Infrastructure error types
pub mod error;

// Storage implementations
pub mod azure;
pub mod memory_tier_store;

// Re-export key types
pub use azure::{AzureBlobTierStore, ConnectionSettings};
pub use error::StoreError;
pub use memory_tier_store::InMemoryTierStore;
