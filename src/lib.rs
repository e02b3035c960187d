pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core entities and value objects
pub use domain::{
    AccessTier,
    // Value objects
    ContainerName,
    ObjectPath,
    // Models
    RunConfig,
    RunSummary,
    Selection,
    StorageObjectRef,
    TierPolicy,
    // Errors
    StorageError,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{LogSink, TierStore};

// Services - the selection-and-transition pipeline
pub use services::{FixOutcome, ObjectProvider, TierPipeline, TierRunError, TransitionExecutor};

// Application factory and configuration
pub use app::{AppBuilder, AppConfig, AppError, StorageBackend};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    logging::{CapturingSink, ConsoleSink},
    storage::{AzureBlobTierStore, InMemoryTierStore},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AccessTier, AppBuilder, AppConfig, CapturingSink, ContainerName, InMemoryTierStore,
        ObjectPath, RunConfig, StorageBackend, TierPipeline, TierStore,
    };
}
