pub mod logging;
pub mod storage;

// Re-export all port traits for convenience
pub use logging::LogSink;
pub use storage::TierStore;
