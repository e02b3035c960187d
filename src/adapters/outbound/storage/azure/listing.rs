//! XML bodies returned by the blob service.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use crate::adapters::outbound::storage::error::StoreError;

const BLOCK_BLOB: &str = "BlockBlob";

/// One page of a `List Blobs` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumerationResults {
    #[serde(default)]
    pub blobs: BlobList,
    #[serde(default)]
    pub next_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlobList {
    #[serde(rename = "Blob", default)]
    pub items: Vec<BlobEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlobEntry {
    pub name: String,
    #[serde(default)]
    pub snapshot: Option<String>,
    pub properties: BlobEntryProperties,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct BlobEntryProperties {
    #[serde(rename = "Last-Modified", default)]
    pub last_modified: Option<String>,
    #[serde(rename = "BlobType", default)]
    pub blob_type: Option<String>,
    #[serde(rename = "AccessTier", default)]
    pub access_tier: Option<String>,
}

/// `<Error>` body sent with failing responses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EnumerationResults {
    pub fn parse(xml: &str) -> Result<Self, StoreError> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Marker for the following page, if any
    pub fn continuation(&self) -> Option<&str> {
        self.next_marker.as_deref().filter(|marker| !marker.is_empty())
    }
}

impl BlobEntry {
    /// Page and append blobs have no standard access tier
    pub fn is_block_blob(&self) -> bool {
        self.properties.blob_type.as_deref() == Some(BLOCK_BLOB)
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref().filter(|s| !s.is_empty())
    }

    pub fn access_tier(&self) -> Option<&str> {
        self.properties
            .access_tier
            .as_deref()
            .filter(|tier| !tier.is_empty())
    }

    /// RFC 1123 `Last-Modified`, as sent by the service
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.properties
            .last_modified
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
            .map(|value| value.with_timezone(&Utc))
    }
}

impl ErrorBody {
    /// Best effort; an unparseable body yields an empty error
    pub fn parse(xml: &str) -> Self {
        quick_xml::de::from_str(xml).unwrap_or_default()
    }
}
