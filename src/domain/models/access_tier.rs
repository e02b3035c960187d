use serde::{Serialize, Serializer};

use crate::domain::errors::ValidationError;

/// Access tiers an object can be stored in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccessTier {
    Hot,
    Cool,
    Cold,
    Archive,
    Custom(String),
}

impl AccessTier {
    pub fn as_str(&self) -> &str {
        match self {
            AccessTier::Hot => "Hot",
            AccessTier::Cool => "Cool",
            AccessTier::Cold => "Cold",
            AccessTier::Archive => "Archive",
            AccessTier::Custom(s) => s,
        }
    }

    /// Map a tier name reported by a backend. Never fails: names outside the
    /// standard set are kept verbatim as `Custom`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "Hot" => AccessTier::Hot,
            "Cool" => AccessTier::Cool,
            "Cold" => AccessTier::Cold,
            "Archive" => AccessTier::Archive,
            _ => AccessTier::Custom(s.to_string()),
        }
    }
}

impl std::fmt::Display for AccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict, case-insensitive parse of operator input
impl std::str::FromStr for AccessTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Ok(AccessTier::Hot),
            "cool" => Ok(AccessTier::Cool),
            "cold" => Ok(AccessTier::Cold),
            "archive" => Ok(AccessTier::Archive),
            _ => Err(ValidationError::UnknownAccessTier(s.to_string())),
        }
    }
}

impl Serialize for AccessTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(AccessTier::from_wire("Archive"), AccessTier::Archive);
        assert_eq!(AccessTier::from_wire("Hot").as_str(), "Hot");
        assert_eq!(
            AccessTier::from_wire("P10"),
            AccessTier::Custom("P10".to_string())
        );
    }

    #[test]
    fn test_parse_operator_input() {
        assert_eq!("archive".parse::<AccessTier>(), Ok(AccessTier::Archive));
        assert_eq!("COOL".parse::<AccessTier>(), Ok(AccessTier::Cool));
        assert_eq!(
            "glacier".parse::<AccessTier>(),
            Err(ValidationError::UnknownAccessTier("glacier".to_string()))
        );
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(AccessTier::Archive.to_string(), "Archive");
        assert_eq!(
            serde_json::to_string(&AccessTier::Cold).unwrap(),
            "\"Cold\""
        );
    }
}
