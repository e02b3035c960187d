use serde::Serialize;

use crate::domain::errors::ValidationError;

const MAX_PATH_LEN: usize = 1024;

/// A validated object name, relative to its container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Create a new ObjectPath with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectPath);
        }

        let length = value.chars().count();
        if length > MAX_PATH_LEN {
            return Err(ValidationError::ObjectPathTooLong {
                actual: length,
                max: MAX_PATH_LEN,
            });
        }

        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectPathCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::ObjectPathStartsWithSlash);
        }

        Ok(Self(value))
    }

    /// A name reported by a store listing. The store is the authority on
    /// which names exist, so operator input rules are not applied.
    pub(crate) fn from_listing(value: String) -> Self {
        Self(value)
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, for per-segment URL encoding
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ObjectPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_object_path() {
        assert!(ObjectPath::new("file.bin".to_string()).is_ok());
        assert!(ObjectPath::new("dir/file.bin".to_string()).is_ok());
        assert!(ObjectPath::new("deep/dir//with double/file".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_object_path() {
        assert_eq!(
            ObjectPath::new("".to_string()),
            Err(ValidationError::EmptyObjectPath)
        );
        assert_eq!(
            ObjectPath::new("/leading".to_string()),
            Err(ValidationError::ObjectPathStartsWithSlash)
        );
        assert!(ObjectPath::new("null\0byte".to_string()).is_err());
        assert!(ObjectPath::new("x".repeat(1025)).is_err());
    }

    #[test]
    fn test_length_limit_counts_characters() {
        // 1024 characters, 3072 bytes
        assert!(ObjectPath::new("日".repeat(1024)).is_ok());
        assert_eq!(
            ObjectPath::new("日".repeat(1025)),
            Err(ValidationError::ObjectPathTooLong {
                actual: 1025,
                max: 1024
            })
        );
    }

    #[test]
    fn test_listed_names_are_kept_verbatim() {
        let path = ObjectPath::from_listing("/leading/slash".to_string());
        assert_eq!(path.as_str(), "/leading/slash");
    }

    #[test]
    fn test_object_path_segments() {
        let path = ObjectPath::new("dir/sub/file.bin".to_string()).unwrap();
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["dir", "sub", "file.bin"]);
    }
}
