//! GraphQL request payloads.
//!
//! This module provides the [`GraphqlRequest`] type: the `{query, variables}`
//! body POSTed to the storefront GraphQL endpoint.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::errors::InvalidHttpRequestError;

/// A GraphQL request body.
///
/// Each payload is built for one call and discarded afterwards.
///
/// # Example
///
/// ```rust
/// use bigcommerce_graphql::clients::GraphqlRequest;
///
/// let request = GraphqlRequest::new("query { site { settings { storeName } } }")
///     .variable("pageSize", 50)
///     .variable("cursor", "");
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["variables"]["pageSize"], 50);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlRequest {
    /// The GraphQL query string.
    pub query: String,
    /// Query variables, always serialized as an object.
    pub variables: Map<String, Value>,
}

impl GraphqlRequest {
    /// Creates a request with no variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Adds a single variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Validates the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyQuery`] if the query is blank.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.query.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyQuery);
        }
        Ok(())
    }
}
