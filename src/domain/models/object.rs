use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::access_tier::AccessTier;
use crate::domain::value_objects::{ContainerName, ObjectPath};

/// Reference to one object in a container, as produced by a listing or
/// resolved from an explicit path
#[derive(Debug, Clone, PartialEq)]
pub struct StorageObjectRef {
    pub container: ContainerName,
    pub name: ObjectPath,
    pub uri: String,
    pub snapshot: Option<String>,
    /// `None` when the backend did not report a tier
    pub tier: Option<AccessTier>,
    pub last_modified: Option<DateTime<Utc>>,
    pub metadata: HashMap<String, String>,
}

impl StorageObjectRef {
    /// Reference without any listing detail attached
    pub fn new(container: ContainerName, name: ObjectPath, uri: String) -> Self {
        Self {
            container,
            name,
            uri,
            snapshot: None,
            tier: None,
            last_modified: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_tier(mut self, tier: Option<AccessTier>) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_snapshot(mut self, snapshot: Option<String>) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// `{container}/{name}`
    pub fn location(&self) -> String {
        format!("{}/{}", self.container, self.name)
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_joins_container_and_name() {
        let obj = StorageObjectRef::new(
            ContainerName::new("data".to_string()).unwrap(),
            ObjectPath::new("dir/file.bin".to_string()).unwrap(),
            "memory:///data/dir/file.bin".to_string(),
        );
        assert_eq!(obj.location(), "data/dir/file.bin");
        assert!(!obj.is_snapshot());
        assert_eq!(obj.tier, None);
    }
}
