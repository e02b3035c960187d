use async_trait::async_trait;
use bytes::Bytes;
use futures::{
    StreamExt, TryStreamExt,
    stream::{self, BoxStream},
};
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectMeta, ObjectStore as ApacheObjectStore,
    PutOptions, PutPayload, memory::InMemory, path::Path as ObjectStorePath,
};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{AccessTier, StorageObjectRef},
        value_objects::{ContainerName, ObjectPath},
    },
    ports::storage::TierStore,
};

const TIER_ATTRIBUTE: &str = "access-tier";

fn tier_attribute() -> Attribute {
    Attribute::Metadata(Cow::Borrowed(TIER_ATTRIBUTE))
}

/// Tier store backed by Apache object_store's `InMemory`.
///
/// Objects live under `{container}/{name}`; the tier is kept as object
/// metadata. Containers must be created before they can be listed.
///
/// `object_store` paths drop empty segments, so names with `//` or a
/// trailing `/` cannot be stored here and are rejected on seeding.
pub struct InMemoryTierStore {
    inner: InMemory,
    containers: RwLock<HashSet<ContainerName>>,
    failing: RwLock<HashSet<String>>,
    list_calls: AtomicUsize,
    set_tier_calls: AtomicUsize,
}

impl InMemoryTierStore {
    pub fn new() -> Self {
        Self {
            inner: InMemory::new(),
            containers: RwLock::new(HashSet::new()),
            failing: RwLock::new(HashSet::new()),
            list_calls: AtomicUsize::new(0),
            set_tier_calls: AtomicUsize::new(0),
        }
    }

    pub async fn create_container(&self, container: &ContainerName) {
        self.containers.write().await.insert(container.clone());
    }

    /// Seed an object. `tier: None` leaves the tier unreported.
    pub async fn put_object(
        &self,
        container: &ContainerName,
        name: &str,
        data: impl Into<Bytes>,
        tier: Option<AccessTier>,
    ) -> StorageResult<()> {
        let name = ObjectPath::new(name.to_string())
            .map_err(|e| StorageError::invalid_name(name, e))?;
        if name.segments().any(str::is_empty) {
            return Err(StorageError::invalid_name(
                name.as_str(),
                "empty path segment",
            ));
        }
        let mut attributes = Attributes::new();
        if let Some(tier) = tier {
            attributes.insert(tier_attribute(), AttributeValue::from(tier.as_str().to_string()));
        }
        self.write(container, &name, PutPayload::from(data.into()), attributes)
            .await
    }

    /// Make every later `set_tier` on this object name fail
    pub async fn fail_set_tier_for(&self, name: &str) {
        self.failing.write().await.insert(name.to_string());
    }

    /// Number of `list_objects` calls that reached the store
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of attempted tier changes, failed ones included
    pub fn set_tier_calls(&self) -> usize {
        self.set_tier_calls.load(Ordering::SeqCst)
    }

    fn path_for(container: &ContainerName, name: &ObjectPath) -> ObjectStorePath {
        ObjectStorePath::from(format!("{}/{}", container, name))
    }

    async fn write(
        &self,
        container: &ContainerName,
        name: &ObjectPath,
        payload: PutPayload,
        attributes: Attributes,
    ) -> StorageResult<()> {
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };
        self.inner
            .put_opts(&Self::path_for(container, name), payload, opts)
            .await?;
        Ok(())
    }

    async fn ensure_container(&self, container: &ContainerName) -> StorageResult<()> {
        if self.containers.read().await.contains(container) {
            Ok(())
        } else {
            Err(StorageError::ContainerNotFound {
                container: container.clone(),
            })
        }
    }

    async fn describe(
        &self,
        container: &ContainerName,
        meta: ObjectMeta,
    ) -> StorageResult<StorageObjectRef> {
        let location = meta.location.to_string();
        let raw_name = location
            .strip_prefix(&format!("{}/", container))
            .unwrap_or(&location);
        let name = ObjectPath::from_listing(raw_name.to_string());

        let result = self.inner.get(&meta.location).await?;
        let tier = result
            .attributes
            .get(&tier_attribute())
            .map(|value| AccessTier::from_wire(value.as_ref()));

        let mut object = self.object_ref(container, &name).with_tier(tier);
        object.last_modified = Some(meta.last_modified);
        Ok(object)
    }
}

impl Default for InMemoryTierStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TierStore for InMemoryTierStore {
    fn list_objects<'a>(
        &'a self,
        container: &'a ContainerName,
    ) -> BoxStream<'a, StorageResult<StorageObjectRef>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        stream::once(self.ensure_container(container))
            .map_ok(move |()| {
                let prefix = ObjectStorePath::from(container.as_str());
                self.inner
                    .list(Some(&prefix))
                    .map_err(StorageError::from)
                    .and_then(move |meta| self.describe(container, meta))
            })
            .try_flatten()
            .boxed()
    }

    fn object_ref(&self, container: &ContainerName, path: &ObjectPath) -> StorageObjectRef {
        StorageObjectRef::new(
            container.clone(),
            path.clone(),
            format!("memory:///{}/{}", container, path),
        )
    }

    async fn set_tier(&self, object: &StorageObjectRef, tier: &AccessTier) -> StorageResult<()> {
        self.set_tier_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.read().await.contains(object.name.as_str()) {
            return Err(StorageError::StorageBackendError {
                status: 500,
                code: Some("InjectedFailure".to_string()),
                message: format!("set_tier rejected for {}", object.location()),
            });
        }

        let path = Self::path_for(&object.container, &object.name);
        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                StorageError::object_not_found(&object.container, &object.name)
            }
            other => other.into(),
        })?;
        let mut attributes = result.attributes.clone();
        let data = result.bytes().await?;

        attributes.insert(tier_attribute(), AttributeValue::from(tier.as_str().to_string()));
        self.write(&object.container, &object.name, PutPayload::from(data), attributes)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerName {
        ContainerName::new("data".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_listing_reports_seeded_tiers() {
        let store = InMemoryTierStore::new();
        store.create_container(&container()).await;
        store
            .put_object(&container(), "a/hot.bin", b"1".to_vec(), Some(AccessTier::Hot))
            .await
            .unwrap();
        store
            .put_object(&container(), "b/unknown.bin", b"2".to_vec(), None)
            .await
            .unwrap();

        let objects: Vec<_> = store.list_objects(&container()).try_collect().await.unwrap();

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name.as_str(), "a/hot.bin");
        assert_eq!(objects[0].tier, Some(AccessTier::Hot));
        assert!(objects[0].last_modified.is_some());
        assert_eq!(objects[1].name.as_str(), "b/unknown.bin");
        assert_eq!(objects[1].tier, None);
    }

    #[tokio::test]
    async fn test_listing_is_scoped_to_container() {
        let store = InMemoryTierStore::new();
        let other = ContainerName::new("other".to_string()).unwrap();
        store.create_container(&container()).await;
        store.create_container(&other).await;
        store
            .put_object(&other, "elsewhere.bin", b"1".to_vec(), Some(AccessTier::Hot))
            .await
            .unwrap();

        let objects: Vec<_> = store.list_objects(&container()).try_collect().await.unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn test_set_tier_keeps_payload() {
        let store = InMemoryTierStore::new();
        store.create_container(&container()).await;
        store
            .put_object(&container(), "file.bin", b"payload".to_vec(), Some(AccessTier::Cool))
            .await
            .unwrap();
        let object = store.object_ref(&container(), &ObjectPath::new("file.bin".to_string()).unwrap());

        store.set_tier(&object, &AccessTier::Archive).await.unwrap();

        let objects: Vec<_> = store.list_objects(&container()).try_collect().await.unwrap();
        assert_eq!(objects[0].tier, Some(AccessTier::Archive));
        let data = store
            .inner
            .get(&ObjectStorePath::from("data/file.bin"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(data.as_ref(), b"payload");
    }

    #[tokio::test]
    async fn test_set_tier_on_missing_object_fails() {
        let store = InMemoryTierStore::new();
        let object = store.object_ref(&container(), &ObjectPath::new("ghost.bin".to_string()).unwrap());

        let err = store.set_tier(&object, &AccessTier::Archive).await.unwrap_err();
        assert!(matches!(err, StorageError::ObjectNotFound { ref location } if location == "data/ghost.bin"));
    }

    #[tokio::test]
    async fn test_names_with_empty_segments_are_rejected() {
        let store = InMemoryTierStore::new();
        store.create_container(&container()).await;

        for name in ["dir//x.bin", "dir/"] {
            let err = store
                .put_object(&container(), name, b"1".to_vec(), Some(AccessTier::Hot))
                .await
                .unwrap_err();
            assert!(matches!(err, StorageError::InvalidObjectName { name: ref n, .. } if n == name));
        }

        let objects: Vec<_> = store.list_objects(&container()).try_collect().await.unwrap();
        assert!(objects.is_empty());
    }
}
