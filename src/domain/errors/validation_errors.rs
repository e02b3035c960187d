/// Validation errors for domain value objects and run parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectPath validation errors
    EmptyObjectPath,
    ObjectPathTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectPathCharacter(char),
    ObjectPathStartsWithSlash,

    // ContainerName validation errors
    ContainerNameTooShort {
        actual: usize,
        min: usize,
    },
    ContainerNameTooLong {
        actual: usize,
        max: usize,
    },
    ContainerNameInvalidStart,
    ContainerNameInvalidEnd,
    ContainerNameInvalidCharacter(char),
    ContainerNameConsecutiveHyphens,

    // AccessTier validation errors
    UnknownAccessTier(String),

    // Connection string validation errors
    MalformedConnectionSetting(String),
    MissingConnectionSetting(&'static str),
    UnsupportedCredential(String),

    // Run parameter errors
    InvalidField {
        field: String,
        value: String,
        expected: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectPath errors
            ValidationError::EmptyObjectPath => write!(f, "Object path cannot be empty"),
            ValidationError::ObjectPathTooLong { actual, max } => {
                write!(f, "Object path too long: {} characters (max: {})", actual, max)
            }
            ValidationError::InvalidObjectPathCharacter(c) => {
                write!(f, "Invalid character in object path: {:?}", c)
            }
            ValidationError::ObjectPathStartsWithSlash => {
                write!(f, "Object path cannot start with '/'")
            }

            // ContainerName errors
            ValidationError::ContainerNameTooShort { actual, min } => {
                write!(
                    f,
                    "Container name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::ContainerNameTooLong { actual, max } => {
                write!(
                    f,
                    "Container name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::ContainerNameInvalidStart => {
                write!(
                    f,
                    "Container name must start with lowercase letter or number"
                )
            }
            ValidationError::ContainerNameInvalidEnd => {
                write!(f, "Container name must end with lowercase letter or number")
            }
            ValidationError::ContainerNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in container name: '{}'. Only lowercase letters, numbers, and hyphens allowed",
                    c
                )
            }
            ValidationError::ContainerNameConsecutiveHyphens => {
                write!(f, "Container name cannot contain consecutive hyphens")
            }

            ValidationError::UnknownAccessTier(value) => {
                write!(
                    f,
                    "Unknown access tier '{}' (expected one of: hot, cool, cold, archive)",
                    value
                )
            }

            ValidationError::MalformedConnectionSetting(setting) => {
                write!(
                    f,
                    "Malformed connection string setting '{}' (expected Key=Value)",
                    setting
                )
            }
            ValidationError::MissingConnectionSetting(key) => {
                write!(f, "Connection string is missing required setting '{}'", key)
            }
            ValidationError::UnsupportedCredential(reason) => {
                write!(f, "Unsupported connection credential: {}", reason)
            }

            ValidationError::InvalidField {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value for field '{}': '{}' (expected: {})",
                    field, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
