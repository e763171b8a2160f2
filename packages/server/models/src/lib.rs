#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the candy map server.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Query parameters for `GET /api/top-streets`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopStreetsParams {
    /// Assessor neighborhood to rank. Required.
    pub neighborhood: Option<String>,
    /// Number of streets to return.
    pub count: Option<usize>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human readable message.
    pub error: String,
}

impl ApiError {
    /// Error for a required query parameter that was not supplied.
    #[must_use]
    pub fn missing_parameter(name: &str) -> Self {
        Self {
            error: format!("Missing parameter: {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_message() {
        assert_eq!(
            serde_json::to_value(ApiError::missing_parameter("neighborhood")).unwrap(),
            serde_json::json!({"error": "Missing parameter: neighborhood"})
        );
    }

    #[test]
    fn top_streets_params_are_optional() {
        let params: TopStreetsParams = serde_json::from_str("{}").unwrap();
        assert!(params.neighborhood.is_none());
        assert!(params.count.is_none());
    }
}
