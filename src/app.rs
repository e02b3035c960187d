use std::sync::Arc;
use tracing::info;

use crate::{
    adapters::outbound::{
        logging::ConsoleSink,
        storage::{AzureBlobTierStore, ConnectionSettings, InMemoryTierStore},
    },
    domain::models::RunConfig,
    ports::{LogSink, TierStore},
    services::TierPipeline,
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub run: RunConfig,
}

/// Storage backend configuration
#[derive(Clone)]
pub enum StorageBackend {
    InMemory,
    Azure { connection_string: String },
}

impl StorageBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            StorageBackend::InMemory => "memory",
            StorageBackend::Azure { .. } => "azure",
        }
    }
}

// The connection string carries credentials; only the backend kind is printable
impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    tier_store: Option<Arc<dyn TierStore>>,
    log_sink: Option<Arc<dyn LogSink>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            tier_store: None,
            log_sink: None,
        }
    }

    /// Use an existing store instead of building one from the backend setting
    pub fn with_tier_store(mut self, store: Arc<dyn TierStore>) -> Self {
        self.tier_store = Some(store);
        self
    }

    /// Where operator-facing lines go; stdout when unset
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Build the pipeline for the configured run
    pub fn build(self) -> Result<TierPipeline, AppError> {
        self.config
            .run
            .validate()
            .map_err(|e| AppError::Configuration {
                message: e.to_string(),
            })?;

        let store = match self.tier_store {
            Some(store) => store,
            None => Self::create_tier_store(&self.config.storage_backend)?,
        };
        let log = self
            .log_sink
            .unwrap_or_else(|| Arc::new(ConsoleSink) as Arc<dyn LogSink>);

        let pipeline = TierPipeline::from_config(store, &self.config.run, log);
        info!(
            backend = self.config.storage_backend.kind(),
            provider = pipeline.provider().kind(),
            dry_run = pipeline.executor().is_dry_run(),
            "Pipeline assembled"
        );
        Ok(pipeline)
    }

    /// Create the storage adapter based on configuration
    fn create_tier_store(backend: &StorageBackend) -> Result<Arc<dyn TierStore>, AppError> {
        match backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemoryTierStore::new())),
            StorageBackend::Azure { connection_string } => {
                let settings = ConnectionSettings::parse(connection_string).map_err(|e| {
                    AppError::Configuration {
                        message: format!("Invalid connection string: {}", e),
                    }
                })?;
                let store = AzureBlobTierStore::new(settings).map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?;
                Ok(Arc::new(store))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ContainerName;

    fn run_config() -> RunConfig {
        RunConfig::builder()
            .container(ContainerName::new("data".to_string()).unwrap())
            .build()
    }

    #[test]
    fn test_in_memory_app_builds() {
        let pipeline = AppBuilder::new(AppConfig {
            storage_backend: StorageBackend::InMemory,
            run: run_config(),
        })
        .build()
        .unwrap();

        assert_eq!(pipeline.provider().kind(), "warm-only");
        assert!(!pipeline.executor().is_dry_run());
    }

    #[test]
    fn test_bad_connection_string_is_configuration_error() {
        let result = AppBuilder::new(AppConfig {
            storage_backend: StorageBackend::Azure {
                connection_string: "AccountName=acme;AccountKey=secret".to_string(),
            },
            run: run_config(),
        })
        .build();

        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[test]
    fn test_zero_cap_is_configuration_error() {
        let mut run = run_config();
        run.max_objects = 0;
        let result = AppBuilder::new(AppConfig {
            storage_backend: StorageBackend::InMemory,
            run,
        })
        .build();

        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[test]
    fn test_backend_debug_hides_connection_string() {
        let backend = StorageBackend::Azure {
            connection_string: "AccountName=acme;SharedAccessSignature=sig=secret".to_string(),
        };
        assert_eq!(format!("{:?}", backend), "azure");
    }
}
