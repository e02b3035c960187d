use async_trait::async_trait;
use futures::{
    StreamExt, TryStreamExt,
    stream::{self, BoxStream},
};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, trace};

use super::{
    connection_string::ConnectionSettings,
    listing::{BlobEntry, EnumerationResults, ErrorBody},
};
use crate::{
    adapters::outbound::storage::error::StoreError,
    domain::{
        errors::{StorageResult, ValidationError},
        models::{AccessTier, StorageObjectRef},
        value_objects::{ContainerName, ObjectPath},
    },
    ports::storage::TierStore,
};

const API_VERSION: &str = "2023-11-03";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tier store talking to Azure Blob Storage over its REST API,
/// authenticated with a shared access signature.
pub struct AzureBlobTierStore {
    client: Client,
    settings: ConnectionSettings,
}

/// One fetched listing page, already mapped to domain references
struct ListingPage {
    objects: Vec<StorageObjectRef>,
    next_marker: Option<String>,
}

impl AzureBlobTierStore {
    pub fn new(settings: ConnectionSettings) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, settings))
    }

    /// Use a preconfigured HTTP client (proxy, timeouts, TLS roots)
    pub fn with_client(client: Client, settings: ConnectionSettings) -> Self {
        Self { client, settings }
    }

    pub fn from_connection_string(connection_string: &str) -> Result<Self, StoreError> {
        let settings = ConnectionSettings::parse(connection_string)
            .map_err(|e: ValidationError| StoreError::Other(e.to_string()))?;
        Self::new(settings)
    }

    pub fn blob_endpoint(&self) -> &str {
        &self.settings.blob_endpoint
    }

    fn container_url(&self, container: &ContainerName) -> String {
        format!("{}/{}", self.settings.blob_endpoint, container)
    }

    /// Absolute object URL with each path segment percent-encoded
    fn object_url(&self, container: &ContainerName, path: &ObjectPath) -> String {
        let encoded: Vec<_> = path
            .segments()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.container_url(container), encoded.join("/"))
    }

    fn with_sas(&self, url: String, query: &[(&str, &str)]) -> String {
        let mut params: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        if !self.settings.sas_token.is_empty() {
            params.push(self.settings.sas_token.clone());
        }
        format!("{}?{}", url, params.join("&"))
    }

    fn listing_url(&self, container: &ContainerName, marker: Option<&str>) -> String {
        let mut query = vec![
            ("restype", "container"),
            ("comp", "list"),
            ("include", "metadata,snapshots"),
        ];
        if let Some(marker) = marker {
            query.push(("marker", marker));
        }
        self.with_sas(self.container_url(container), &query)
    }

    fn set_tier_url(&self, object: &StorageObjectRef) -> String {
        let mut query = vec![("comp", "tier")];
        if let Some(snapshot) = object.snapshot.as_deref() {
            query.push(("snapshot", snapshot));
        }
        self.with_sas(self.object_url(&object.container, &object.name), &query)
    }

    async fn check_status(
        response: Response,
        operation: &'static str,
        container: &ContainerName,
        location: String,
    ) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = ErrorBody::parse(&body);
        Err(StoreError::Http {
            operation,
            container: container.clone(),
            location,
            status,
            code: error.code,
            message: error
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
        })
    }

    fn to_object_ref(&self, container: &ContainerName, entry: BlobEntry) -> StorageObjectRef {
        let tier = entry.access_tier().map(AccessTier::from_wire);
        let snapshot = entry.snapshot().map(str::to_string);
        let last_modified = entry.last_modified();
        let name = ObjectPath::from_listing(entry.name);

        let mut object = self
            .object_ref(container, &name)
            .with_tier(tier)
            .with_snapshot(snapshot);
        object.last_modified = last_modified;
        object.metadata = entry.metadata;
        object
    }

    async fn list_page(
        &self,
        container: &ContainerName,
        marker: Option<&str>,
    ) -> StorageResult<ListingPage> {
        trace!(container = %container, marker = ?marker, "Fetching listing page");
        let response = self
            .client
            .get(self.listing_url(container, marker))
            .header("x-ms-version", API_VERSION)
            .send()
            .await
            .map_err(StoreError::from)?;
        let response =
            Self::check_status(response, "list_objects", container, container.to_string()).await?;
        let body = response.text().await.map_err(StoreError::from)?;
        let page = EnumerationResults::parse(&body)?;

        let next_marker = page.continuation().map(str::to_string);
        let objects = page
            .blobs
            .items
            .into_iter()
            .filter(BlobEntry::is_block_blob)
            .map(|entry| self.to_object_ref(container, entry))
            .collect::<Vec<_>>();
        debug!(container = %container, count = objects.len(), more = next_marker.is_some(), "Listing page fetched");

        Ok(ListingPage {
            objects,
            next_marker,
        })
    }

    /// Unfold step over the marker state: `Some(marker)` while pages remain
    /// (the first page has no marker), `None` once the last page was read.
    async fn next_page(
        &self,
        container: &ContainerName,
        state: Option<Option<String>>,
    ) -> StorageResult<Option<(Vec<StorageObjectRef>, Option<Option<String>>)>> {
        let Some(marker) = state else {
            return Ok(None);
        };
        let page = self.list_page(container, marker.as_deref()).await?;
        Ok(Some((page.objects, page.next_marker.map(Some))))
    }
}

#[async_trait]
impl TierStore for AzureBlobTierStore {
    fn list_objects<'a>(
        &'a self,
        container: &'a ContainerName,
    ) -> BoxStream<'a, StorageResult<StorageObjectRef>> {
        let pages = stream::try_unfold(Some(None), move |state| self.next_page(container, state));

        pages
            .map_ok(|objects| stream::iter(objects.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }

    fn object_ref(&self, container: &ContainerName, path: &ObjectPath) -> StorageObjectRef {
        StorageObjectRef::new(container.clone(), path.clone(), self.object_url(container, path))
    }

    async fn set_tier(&self, object: &StorageObjectRef, tier: &AccessTier) -> StorageResult<()> {
        let response = self
            .client
            .put(self.set_tier_url(object))
            .header("x-ms-version", API_VERSION)
            .header("x-ms-access-tier", tier.as_str())
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await
            .map_err(StoreError::from)?;
        Self::check_status(response, "set_tier", &object.container, object.location()).await?;
        Ok(())
    }
}
