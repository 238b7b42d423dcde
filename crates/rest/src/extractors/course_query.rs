//! Course list query extractor.
//!
//! Parses the `id` and `name` filters from the query string. Every other
//! query parameter is ignored.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use campus_persistence::types::CourseFilter;
use std::collections::HashMap;

use crate::error::RestError;

/// Axum extractor for course list filters.
///
/// Values are trimmed, and empty values are treated as absent, so `?name=`
/// lists everything.
///
/// # Example
///
/// ```rust,ignore
/// use campus_rest::extractors::CourseQuery;
///
/// async fn list_handler(query: CourseQuery) {
///     println!("id filter: {:?}", query.filter().id);
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct CourseQuery {
    filter: CourseFilter,
}

impl CourseQuery {
    /// Builds the filter from raw query parameters.
    pub fn from_map(params: &HashMap<String, String>) -> Result<Self, RestError> {
        let mut filter = CourseFilter::new();

        if let Some(raw) = params.get("id").filter(|v| !v.trim().is_empty()) {
            let id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| RestError::invalid_field("id", "Enter a whole number."))?;
            filter = filter.with_id(id);
        }

        if let Some(name) = params.get("name").map(|v| v.trim()).filter(|v| !v.is_empty()) {
            filter = filter.with_name(name);
        }

        Ok(Self { filter })
    }

    /// Returns the parsed filter.
    pub fn filter(&self) -> &CourseFilter {
        &self.filter
    }

    /// Consumes the extractor and returns the filter.
    pub fn into_filter(self) -> CourseFilter {
        self.filter
    }
}

impl<S> FromRequestParts<S> for CourseQuery
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| RestError::BadRequest {
                message: "Invalid query parameters".to_string(),
            })?;

        CourseQuery::from_map(&params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query() {
        let query = CourseQuery::from_map(&HashMap::new()).unwrap();
        assert!(query.filter().is_empty());
    }

    #[test]
    fn test_id_and_name() {
        let query = CourseQuery::from_map(&params(&[("id", "7"), ("name", "Algebra")])).unwrap();
        assert_eq!(query.filter().id, Some(7));
        assert_eq!(query.filter().name.as_deref(), Some("Algebra"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let query = CourseQuery::from_map(&params(&[("id", ""), ("name", "")])).unwrap();
        assert!(query.filter().is_empty());
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let query = CourseQuery::from_map(&params(&[("page", "2"), ("ordering", "-name")])).unwrap();
        assert!(query.filter().is_empty());
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let err = CourseQuery::from_map(&params(&[("id", "abc")])).unwrap_err();
        assert_eq!(
            err.body(),
            serde_json::json!({"id": ["Enter a whole number."]})
        );
    }
}
