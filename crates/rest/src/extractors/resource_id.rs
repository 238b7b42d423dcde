//! Path id extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::RestError;

/// Axum extractor for the numeric `{id}` path segment.
///
/// A segment that is not a whole number cannot name any row, so it is
/// reported as 404 rather than as a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

fn parse_id(raw: &str) -> Result<i64, RestError> {
    raw.parse::<i64>().map_err(|_| RestError::NotFound {
        resource_type: "Resource".to_string(),
        id: raw.to_string(),
    })
}

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        parse_id(&raw).map(ResourceId)
    }
}
