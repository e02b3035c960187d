use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::StorageResult,
        models::{AccessTier, RunConfig, StorageObjectRef},
    },
    ports::{LogSink, TierStore},
};

/// What `fix` did to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    Applied,
    Simulated,
}

/// Applies (or pretends to apply) the tier change to one object.
pub enum TransitionExecutor {
    Applying {
        store: Arc<dyn TierStore>,
        target: AccessTier,
        log: Arc<dyn LogSink>,
    },
    /// Holds no store handle, so it has no way to touch remote state
    Simulating { log: Arc<dyn LogSink> },
}

impl TransitionExecutor {
    pub fn applying(store: Arc<dyn TierStore>, target: AccessTier, log: Arc<dyn LogSink>) -> Self {
        TransitionExecutor::Applying { store, target, log }
    }

    pub fn simulating(log: Arc<dyn LogSink>) -> Self {
        TransitionExecutor::Simulating { log }
    }

    pub fn from_config(
        store: Arc<dyn TierStore>,
        config: &RunConfig,
        log: Arc<dyn LogSink>,
    ) -> Self {
        if config.dry_run {
            Self::simulating(log)
        } else {
            Self::applying(store, config.target_tier.clone(), log)
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, TransitionExecutor::Simulating { .. })
    }

    pub async fn fix(&self, object: &StorageObjectRef) -> StorageResult<FixOutcome> {
        match self {
            TransitionExecutor::Applying { store, target, log } => {
                log.write_line(&format!("Setting {} to {} tier", object.name, target));
                store.set_tier(object, target).await?;
                debug!(location = %object.location(), snapshot = ?object.snapshot, tier = %target, "Tier set");
                Ok(FixOutcome::Applied)
            }
            TransitionExecutor::Simulating { log } => {
                log.write_line(&format!("[dry run] would fix {}", object.name));
                Ok(FixOutcome::Simulated)
            }
        }
    }
}
