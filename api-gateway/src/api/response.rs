//! Standardized API response formats
//!
//! This module provides the response wrappers used by all API endpoints.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A standardized API response wrapper for single resource responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The response data
    pub data: T,
}

/// Additional metadata about a list response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Number of items in the list
    pub count: usize,
}

/// A standardized API response wrapper for list/collection responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    /// The list of items
    pub data: Vec<T>,
    /// Metadata about the list
    pub meta: ResponseMetadata,
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> IntoResponse for ApiListResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> ApiResponse<T> {
    /// Wrap a single resource
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T> ApiListResponse<T> {
    /// Wrap a list, recording its item count
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            data,
            meta: ResponseMetadata { count },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shapes() {
        let json = serde_json::to_value(ApiListResponse::<u8>::new(Vec::new())).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [], "meta": { "count": 0 } }));

        let json = serde_json::to_value(ApiListResponse::new(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [1, 2], "meta": { "count": 2 } }));

        let json = serde_json::to_value(ApiResponse::new("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "data": "x" }));
    }
}
