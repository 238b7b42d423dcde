//! Error types for the Campus REST API.
//!
//! Every error renders as a JSON body in one of two shapes:
//!
//! - `{"detail": "<message>"}` for request-level failures
//! - `{"<field>": ["<message>", ...], ...}` for rejected payload fields,
//!   one key per failing field
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | Body |
//! |--------------|-------------|------|
//! | NotFound | 404 | `{"detail": "Not found."}` |
//! | InvalidReference | 400 | `{"students": ["Invalid pk \"9\" - object does not exist."]}` |
//! | Unavailable / ConnectionFailed | 503 | `{"detail": ...}` |
//! | Other backend errors | 500 | `{"detail": "A server error occurred."}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_persistence::error::{BackendError, ResourceError, StorageError, ValidationError};
use std::collections::BTreeMap;
use std::fmt;
use tracing::error;

/// Messages for every rejected field of one request, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns true when `field` already has a message.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns true when no field was rejected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails with [`RestError::Validation`] if any field was rejected.
    pub fn into_result(self) -> RestResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RestError::Validation(self))
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(field, messages)| (field.clone(), serde_json::json!(messages)))
                .collect(),
        )
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

/// Message for a primary key that names no row.
pub fn does_not_exist(pk: i64) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", pk)
}

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    NotFound {
        /// The resource type (e.g., "Course").
        resource_type: String,
        /// The requested id as it appeared in the request.
        id: String,
    },

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// One or more payload or query fields were rejected (HTTP 400).
    Validation(FieldErrors),

    /// The route exists but does not accept this method (HTTP 405).
    MethodNotAllowed {
        /// The request method.
        method: String,
    },

    /// Unsupported media type (HTTP 415).
    UnsupportedMediaType {
        /// The unsupported content type.
        content_type: String,
    },

    /// Request body exceeds the configured limit (HTTP 413).
    PayloadTooLarge {
        /// Error message.
        message: String,
    },

    /// Storage backend cannot serve requests (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Shorthand for a rejected field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        RestError::Validation(errors)
    }

    /// Returns the HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } | RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the JSON error body.
    pub fn body(&self) -> serde_json::Value {
        match self {
            RestError::NotFound { .. } => detail("Not found."),
            RestError::BadRequest { message } => detail(message),
            RestError::Validation(errors) => errors.to_json(),
            RestError::MethodNotAllowed { method } => {
                detail(&format!("Method \"{}\" not allowed.", method))
            }
            RestError::UnsupportedMediaType { content_type } => detail(&format!(
                "Unsupported media type \"{}\" in request.",
                content_type
            )),
            RestError::PayloadTooLarge { message } => detail(message),
            RestError::ServiceUnavailable { message } => detail(message),
            // Backend details stay in the logs.
            RestError::InternalError { .. } => detail("A server error occurred."),
        }
    }
}

fn detail(message: &str) -> serde_json::Value {
    serde_json::json!({ "detail": message })
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { resource_type, id } => {
                write!(f, "Resource not found: {}/{}", resource_type, id)
            }
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::Validation(errors) => {
                write!(f, "Validation failed: {}", errors)
            }
            RestError::MethodNotAllowed { method } => {
                write!(f, "Method not allowed: {}", method)
            }
            RestError::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type: {}", content_type)
            }
            RestError::PayloadTooLarge { message } => {
                write!(f, "Payload too large: {}", message)
            }
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { resource_type, id } => RestError::NotFound {
                resource_type,
                id: id.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidReference { field, missing } => match missing.first() {
                Some(pk) => RestError::invalid_field(field, does_not_exist(*pk)),
                None => RestError::invalid_field(field, "Invalid pk - object does not exist."),
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. } => {
                RestError::ServiceUnavailable {
                    message: err.to_string(),
                }
            }
            _ => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
