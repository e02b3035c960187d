use futures::{TryStreamExt, stream};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::StorageError,
        models::{RunConfig, RunSummary, StorageObjectRef},
        value_objects::ObjectPath,
    },
    ports::{LogSink, TierStore},
    services::{FixOutcome, ObjectProvider, TransitionExecutor},
};

/// Errors that end a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum TierRunError {
    #[error("Number of provided objects exceeds the limit {limit}")]
    CapExceeded { limit: usize },

    #[error("Failed to enumerate candidate objects")]
    Provider(#[source] StorageError),

    #[error("Failed to transition {name}")]
    Transition {
        name: ObjectPath,
        #[source]
        source: StorageError,
    },
}

/// Wires a provider to an executor behind the object-count safety gate.
///
/// A run happens in two passes. The provider's stream is drained into a
/// buffer first; if the count goes past `max_objects` the run stops before
/// any object is touched. Only a complete, in-bounds buffer is handed to the
/// executor, in listing order.
pub struct TierPipeline {
    provider: ObjectProvider,
    executor: TransitionExecutor,
    max_objects: usize,
    concurrency: usize,
}

impl TierPipeline {
    pub fn new(provider: ObjectProvider, executor: TransitionExecutor, max_objects: usize) -> Self {
        Self {
            provider,
            executor,
            max_objects,
            concurrency: 1,
        }
    }

    /// At most `limit` transitions in flight during the second pass
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    pub fn from_config(store: Arc<dyn TierStore>, config: &RunConfig, log: Arc<dyn LogSink>) -> Self {
        let provider = ObjectProvider::from_config(store.clone(), config, log.clone());
        let executor = TransitionExecutor::from_config(store, config, log);
        Self::new(provider, executor, config.max_objects).with_concurrency(config.concurrency)
    }

    pub fn provider(&self) -> &ObjectProvider {
        &self.provider
    }

    pub fn executor(&self) -> &TransitionExecutor {
        &self.executor
    }

    /// First pass: materialize every candidate, refusing to go past the cap.
    pub async fn collect_candidates(&self) -> Result<Vec<StorageObjectRef>, TierRunError> {
        let mut candidates = self.provider.provide();
        let mut buffer = Vec::new();
        let mut count = 0usize;

        while let Some(object) = candidates
            .try_next()
            .await
            .map_err(TierRunError::Provider)?
        {
            count += 1;
            if count > self.max_objects {
                warn!(limit = self.max_objects, "Candidate count exceeds limit, aborting before any transition");
                return Err(TierRunError::CapExceeded {
                    limit: self.max_objects,
                });
            }
            buffer.push(object);
        }

        Ok(buffer)
    }

    pub async fn run(&self) -> Result<RunSummary, TierRunError> {
        info!(
            provider = self.provider.kind(),
            dry_run = self.executor.is_dry_run(),
            max_objects = self.max_objects,
            "Starting tier run"
        );

        let candidates = self.collect_candidates().await?;
        debug!(count = candidates.len(), "Enumeration complete");

        let applied = AtomicUsize::new(0);
        let simulated = AtomicUsize::new(0);

        stream::iter(candidates.iter().map(Ok::<_, TierRunError>))
            .try_for_each_concurrent(self.concurrency, |object| {
                let (applied, simulated) = (&applied, &simulated);
                async move {
                    let outcome = self.executor.fix(object).await.map_err(|source| {
                        TierRunError::Transition {
                            name: object.name.clone(),
                            source,
                        }
                    })?;
                    match outcome {
                        FixOutcome::Applied => applied.fetch_add(1, Ordering::Relaxed),
                        FixOutcome::Simulated => simulated.fetch_add(1, Ordering::Relaxed),
                    };
                    Ok(())
                }
            })
            .await?;

        let summary = RunSummary {
            candidates: candidates.len(),
            applied: applied.into_inner(),
            simulated: simulated.into_inner(),
        };
        info!(
            candidates = summary.candidates,
            applied = summary.applied,
            simulated = summary.simulated,
            "Tier run finished"
        );
        Ok(summary)
    }
}
