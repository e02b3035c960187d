use serde::Serialize;

use crate::domain::errors::ValidationError;

/// A validated container name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContainerName(String);

impl ContainerName {
    /// Create a new ContainerName with blob-service naming rules
    pub fn new(value: String) -> Result<Self, ValidationError> {
        // Length validation
        if value.len() < 3 {
            return Err(ValidationError::ContainerNameTooShort {
                actual: value.len(),
                min: 3,
            });
        }

        if value.len() > 63 {
            return Err(ValidationError::ContainerNameTooLong {
                actual: value.len(),
                max: 63,
            });
        }

        // Must start and end with lowercase letter or number
        if !value
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::ContainerNameInvalidStart);
        }

        if !value
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::ContainerNameInvalidEnd);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(ValidationError::ContainerNameInvalidCharacter(c));
            }
        }

        if value.contains("--") {
            return Err(ValidationError::ContainerNameConsecutiveHyphens);
        }

        Ok(Self(value))
    }

    /// Get the container name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContainerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContainerName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_container_names() {
        assert!(ContainerName::new("data".to_string()).is_ok());
        assert!(ContainerName::new("backups-2024".to_string()).is_ok());
        assert!(ContainerName::new("123container".to_string()).is_ok());
        assert!(ContainerName::new("a".repeat(63)).is_ok());
    }

    #[test]
    fn test_invalid_container_names() {
        // Too short
        assert!(ContainerName::new("c".to_string()).is_err());

        // Too long
        assert!(ContainerName::new("a".repeat(64)).is_err());

        // Invalid start/end
        assert_eq!(
            ContainerName::new("-data".to_string()),
            Err(ValidationError::ContainerNameInvalidStart)
        );
        assert_eq!(
            ContainerName::new("data-".to_string()),
            Err(ValidationError::ContainerNameInvalidEnd)
        );
        assert!(ContainerName::new("Data".to_string()).is_err()); // uppercase

        // Invalid characters
        assert_eq!(
            ContainerName::new("my_data".to_string()),
            Err(ValidationError::ContainerNameInvalidCharacter('_'))
        );
        assert!(ContainerName::new("my.data".to_string()).is_err());

        // Consecutive hyphens
        assert_eq!(
            ContainerName::new("my--data".to_string()),
            Err(ValidationError::ContainerNameConsecutiveHyphens)
        );
    }
}
