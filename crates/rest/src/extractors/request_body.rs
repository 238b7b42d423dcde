//! Request body extractor.
//!
//! Decodes JSON, URL-encoded form and multipart form bodies into a
//! [`RequestBody`] that the payload types validate field by field.

use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::RestError;

/// A decoded request body.
///
/// Requests without a `Content-Type` header are read as JSON. An empty JSON
/// body reads as the empty object, so required-field errors surface from
/// payload validation instead of as parse failures.
///
/// # Example
///
/// ```rust,ignore
/// use campus_rest::extractors::RequestBody;
/// use campus_rest::payload::CoursePayload;
///
/// async fn create_handler(body: RequestBody) -> RestResult<()> {
///     let payload = CoursePayload::from_body(body)?;
///     println!("Course name: {:?}", payload.name);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document.
    Json(Value),
    /// Form fields in the order they were sent. Repeated keys stay repeated.
    Form(Vec<(String, String)>),
}

/// Error type for body extraction failures.
#[derive(Debug)]
pub enum RequestBodyRejection {
    /// JSON parsing failed.
    InvalidJson(String),
    /// Form or multipart decoding failed.
    InvalidForm(String),
    /// Unsupported content type.
    UnsupportedMediaType(String),
    /// Body exceeded the configured size limit.
    TooLarge(String),
}

impl From<RequestBodyRejection> for RestError {
    fn from(rejection: RequestBodyRejection) -> Self {
        match rejection {
            RequestBodyRejection::InvalidJson(msg) => RestError::BadRequest {
                message: format!("JSON parse error - {}", msg),
            },
            RequestBodyRejection::InvalidForm(msg) => RestError::BadRequest {
                message: format!("Form parse error - {}", msg),
            },
            RequestBodyRejection::UnsupportedMediaType(ct) => {
                RestError::UnsupportedMediaType { content_type: ct }
            }
            RequestBodyRejection::TooLarge(msg) => RestError::PayloadTooLarge { message: msg },
        }
    }
}

impl IntoResponse for RequestBodyRejection {
    fn into_response(self) -> Response {
        RestError::from(self).into_response()
    }
}

/// Body encodings the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    UrlEncoded,
    Multipart,
}

impl BodyFormat {
    /// Picks the decoder for a `Content-Type` value.
    fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "application/json" => Some(BodyFormat::Json),
            "application/x-www-form-urlencoded" => Some(BodyFormat::UrlEncoded),
            "multipart/form-data" => Some(BodyFormat::Multipart),
            other if other.ends_with("+json") => Some(BodyFormat::Json),
            _ => None,
        }
    }
}

fn rejection_for(status: StatusCode, text: String) -> RequestBodyRejection {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        RequestBodyRejection::TooLarge(text)
    } else {
        RequestBodyRejection::InvalidForm(text)
    }
}

impl<S> FromRequest<S> for RequestBody
where
    S: Send + Sync,
{
    type Rejection = RequestBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Must own the string before moving req
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();

        let format = BodyFormat::from_content_type(&content_type)
            .ok_or(RequestBodyRejection::UnsupportedMediaType(content_type))?;

        match format {
            BodyFormat::Json => {
                let bytes = Bytes::from_request(req, state).await.map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        RequestBodyRejection::TooLarge(e.body_text())
                    } else {
                        RequestBodyRejection::InvalidJson(e.body_text())
                    }
                })?;

                let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
                    b"{}"
                } else {
                    &bytes
                };

                serde_json::from_slice(body)
                    .map(RequestBody::Json)
                    .map_err(|e| RequestBodyRejection::InvalidJson(e.to_string()))
            }
            BodyFormat::UrlEncoded => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| rejection_for(e.status(), e.body_text()))?;
                Ok(RequestBody::Form(pairs))
            }
            BodyFormat::Multipart => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| rejection_for(e.status(), e.body_text()))?;

                let mut pairs = Vec::new();
                while let Some(field) = multipart
                    .next_field()
                    .await
                    .map_err(|e| rejection_for(e.status(), e.body_text()))?
                {
                    let Some(name) = field.name().map(str::to_owned) else {
                        continue;
                    };
                    let value = field
                        .text()
                        .await
                        .map_err(|e| rejection_for(e.status(), e.body_text()))?;
                    pairs.push((name, value));
                }
                Ok(RequestBody::Form(pairs))
            }
        }
    }
}
