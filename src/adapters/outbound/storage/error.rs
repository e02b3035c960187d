use crate::domain::{errors::StorageError, value_objects::ContainerName};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed XML response: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("{operation} on {location} failed: HTTP {status} - {message}")]
    Http {
        operation: &'static str,
        container: ContainerName,
        location: String,
        status: http::StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Convert object_store errors to domain storage errors
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => {
                StorageError::ObjectNotFound { location: path }
            }
            _ => StorageError::InfrastructureError {
                message: format!("Object store operation failed: {}", err),
                source: Some(err.to_string()),
            },
        }
    }
}

/// Convert infrastructure StoreError to domain StorageError
impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(transport_err) => StorageError::InfrastructureError {
                message: format!("Request to storage service failed: {}", transport_err),
                source: Some(transport_err.to_string()),
            },
            StoreError::Xml(xml_err) => StorageError::InfrastructureError {
                message: format!("Could not decode storage service response: {}", xml_err),
                source: Some(xml_err.to_string()),
            },
            StoreError::Http {
                operation,
                container,
                location,
                status,
                code,
                message,
            } => match status {
                http::StatusCode::NOT_FOUND if code.as_deref() == Some("ContainerNotFound") => {
                    StorageError::ContainerNotFound { container }
                }
                http::StatusCode::NOT_FOUND => StorageError::ObjectNotFound { location },
                http::StatusCode::UNAUTHORIZED | http::StatusCode::FORBIDDEN => {
                    StorageError::AccessDenied {
                        location,
                        operation: operation.to_string(),
                    }
                }
                _ => StorageError::StorageBackendError {
                    status: status.as_u16(),
                    code,
                    message,
                },
            },
            StoreError::Other(msg) => StorageError::InternalError { message: msg },
        }
    }
}
