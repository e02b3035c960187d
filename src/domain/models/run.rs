use bon::Builder;
use serde::Serialize;

use super::access_tier::AccessTier;
use crate::domain::{
    errors::ValidationError,
    value_objects::{ContainerName, ObjectPath},
};

pub const DEFAULT_MAX_OBJECTS: usize = 5000;

/// Which listing strategy to use when no explicit path is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Only objects with a known tier that is not yet the target
    #[default]
    Warm,
    /// Every object in the container
    All,
}

/// Parameters for one run. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
pub struct RunConfig {
    pub container: ContainerName,
    #[builder(default = AccessTier::Archive)]
    pub target_tier: AccessTier,
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default = DEFAULT_MAX_OBJECTS)]
    pub max_objects: usize,
    /// Transition a single object instead of listing the container
    pub blob_path: Option<ObjectPath>,
    #[builder(default)]
    pub selection: Selection,
    #[builder(default = 1)]
    pub concurrency: usize,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_objects == 0 {
            return Err(ValidationError::InvalidField {
                field: "max_objects".to_string(),
                value: self.max_objects.to_string(),
                expected: "a positive integer".to_string(),
            });
        }
        if self.concurrency == 0 {
            return Err(ValidationError::InvalidField {
                field: "concurrency".to_string(),
                value: self.concurrency.to_string(),
                expected: "a positive integer".to_string(),
            });
        }
        Ok(())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub candidates: usize,
    pub applied: usize,
    pub simulated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerName {
        ContainerName::new("data".to_string()).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let config = RunConfig::builder().container(container()).build();
        assert_eq!(config.max_objects, 5000);
        assert_eq!(config.target_tier, AccessTier::Archive);
        assert!(!config.dry_run);
        assert_eq!(config.blob_path, None);
        assert_eq!(config.selection, Selection::Warm);
        assert_eq!(config.concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = RunConfig::builder()
            .container(container())
            .max_objects(0)
            .build();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidField { ref field, .. }) if field == "max_objects"
        ));
    }

    #[test]
    fn test_serializes_for_startup_dump() {
        let config = RunConfig::builder()
            .container(container())
            .dry_run(true)
            .blob_path(ObjectPath::new("dir/file.bin".to_string()).unwrap())
            .build();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["container"], "data");
        assert_eq!(json["target_tier"], "Archive");
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["blob_path"], "dir/file.bin");
        assert_eq!(json["selection"], "warm");
    }
}
