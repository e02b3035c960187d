use futures::{
    StreamExt, TryStreamExt, future,
    stream::{self, BoxStream},
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::StorageResult,
        models::{RunConfig, Selection, StorageObjectRef, TierPolicy},
        value_objects::{ContainerName, ObjectPath},
    },
    ports::{LogSink, TierStore},
};

/// Produces the candidate objects for a run.
///
/// The variant is picked once from configuration; the pipeline only ever
/// calls [`ObjectProvider::provide`].
pub enum ObjectProvider {
    /// A single object named by the operator
    ExplicitPath {
        store: Arc<dyn TierStore>,
        container: ContainerName,
        path: ObjectPath,
        log: Arc<dyn LogSink>,
    },
    /// Every object in the container
    FullListing {
        store: Arc<dyn TierStore>,
        container: ContainerName,
    },
    /// Objects with a known tier that have not reached the target yet
    WarmOnly {
        store: Arc<dyn TierStore>,
        container: ContainerName,
        policy: TierPolicy,
    },
}

impl ObjectProvider {
    pub fn explicit_path(
        store: Arc<dyn TierStore>,
        container: ContainerName,
        path: ObjectPath,
        log: Arc<dyn LogSink>,
    ) -> Self {
        ObjectProvider::ExplicitPath {
            store,
            container,
            path,
            log,
        }
    }

    pub fn full_listing(store: Arc<dyn TierStore>, container: ContainerName) -> Self {
        ObjectProvider::FullListing { store, container }
    }

    pub fn warm_only(
        store: Arc<dyn TierStore>,
        container: ContainerName,
        policy: TierPolicy,
    ) -> Self {
        ObjectProvider::WarmOnly {
            store,
            container,
            policy,
        }
    }

    /// Explicit path wins; otherwise the configured listing selection
    pub fn from_config(
        store: Arc<dyn TierStore>,
        config: &RunConfig,
        log: Arc<dyn LogSink>,
    ) -> Self {
        let container = config.container.clone();
        match (&config.blob_path, config.selection) {
            (Some(path), _) => Self::explicit_path(store, container, path.clone(), log),
            (None, Selection::All) => Self::full_listing(store, container),
            (None, Selection::Warm) => Self::warm_only(
                store,
                container,
                TierPolicy::new(config.target_tier.clone()),
            ),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ObjectProvider::ExplicitPath { .. } => "explicit-path",
            ObjectProvider::FullListing { .. } => "full-listing",
            ObjectProvider::WarmOnly { .. } => "warm-only",
        }
    }

    /// Lazy candidate sequence. Every call performs a fresh listing.
    pub fn provide(&self) -> BoxStream<'_, StorageResult<StorageObjectRef>> {
        match self {
            ObjectProvider::ExplicitPath {
                store,
                container,
                path,
                log,
            } => {
                let object = store.object_ref(container, path);
                log.write_line(&format!("Blob specified: {}", object.uri));
                stream::once(future::ready(Ok(object))).boxed()
            }
            ObjectProvider::FullListing { store, container } => {
                debug!(container = %container, "Listing all objects");
                store.list_objects(container)
            }
            ObjectProvider::WarmOnly {
                store,
                container,
                policy,
            } => {
                debug!(container = %container, target = %policy.target(), "Listing warm objects");
                store
                    .list_objects(container)
                    .try_filter(move |object| future::ready(policy.is_eligible(object.tier.as_ref())))
                    .boxed()
            }
        }
    }
}
