use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::{
    errors::StorageResult,
    models::{AccessTier, StorageObjectRef},
    value_objects::{ContainerName, ObjectPath},
};

/// Port for the storage client used by the tier pipeline.
/// This abstracts the actual storage backend (Azure Blob, in-memory, etc.)
#[async_trait]
pub trait TierStore: Send + Sync + 'static {
    /// Flat listing of every object in the container, snapshots included,
    /// with metadata and tier state. Pages are fetched lazily as the stream
    /// is polled; each call starts a fresh listing.
    fn list_objects<'a>(
        &'a self,
        container: &'a ContainerName,
    ) -> BoxStream<'a, StorageResult<StorageObjectRef>>;

    /// Build a reference to `container/path` without contacting the backend
    fn object_ref(&self, container: &ContainerName, path: &ObjectPath) -> StorageObjectRef;

    /// Move the object (or snapshot) to the given tier
    async fn set_tier(&self, object: &StorageObjectRef, tier: &AccessTier) -> StorageResult<()>;
}
