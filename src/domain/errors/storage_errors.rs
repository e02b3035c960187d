use crate::domain::value_objects::{ContainerName, ObjectPath};

/// Errors that can occur while talking to the storage backend
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Container does not exist
    ContainerNotFound { container: ContainerName },

    /// Object not found
    ObjectNotFound { location: String },

    /// Credentials rejected or insufficient permissions
    AccessDenied { location: String, operation: String },

    /// Object name returned by the backend is not a valid path
    InvalidObjectName { name: String, reason: String },

    /// Backend answered with an error status
    StorageBackendError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Transport or decoding failure with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },

    /// Generic storage error
    InternalError { message: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ContainerNotFound { container } => {
                write!(f, "Container not found: {}", container)
            }
            StorageError::ObjectNotFound { location } => {
                write!(f, "Object not found: {}", location)
            }
            StorageError::AccessDenied {
                location,
                operation,
            } => {
                write!(
                    f,
                    "Access denied for operation '{}' on: {}",
                    operation, location
                )
            }
            StorageError::InvalidObjectName { name, reason } => {
                write!(f, "Invalid object name '{}' from backend: {}", name, reason)
            }
            StorageError::StorageBackendError {
                status,
                code,
                message,
            } => match code {
                Some(code) => write!(
                    f,
                    "Storage backend error: HTTP {} ({}): {}",
                    status, code, message
                ),
                None => write!(f, "Storage backend error: HTTP {}: {}", status, message),
            },
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
            StorageError::InternalError { message } => {
                write!(f, "Internal storage error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub(crate) fn invalid_name(name: &str, err: impl std::fmt::Display) -> Self {
        StorageError::InvalidObjectName {
            name: name.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn object_not_found(container: &ContainerName, name: &ObjectPath) -> Self {
        StorageError::ObjectNotFound {
            location: format!("{}/{}", container, name),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
