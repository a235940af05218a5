//! GraphQL response envelope.
//!
//! This module provides the [`GraphqlResponse`] type for accessing the status,
//! headers, and parsed JSON body of a storefront GraphQL call.

use std::collections::HashMap;

use serde_json::Value;

/// A response from the storefront GraphQL API.
///
/// The body is kept as opaque JSON. Absence of a `data` field (or a `null`
/// one) means "no result".
#[derive(Clone, Debug, PartialEq)]
pub struct GraphqlResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl GraphqlResponse {
    /// Creates a new `GraphqlResponse`, parsing `Retry-After` if present.
    ///
    /// Negative or non-finite `Retry-After` values are ignored.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Creates a `200 OK` response with no headers around `body`.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        Self::new(200, HashMap::new(), body)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `data` field, if present and non-null.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data").filter(|data| !data.is_null())
    }

    /// Returns `true` when the body carries a non-null `data` field.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data().is_some()
    }

    /// Returns the GraphQL `errors` array, if present.
    #[must_use]
    pub fn errors(&self) -> Option<&Vec<Value>> {
        self.body.get("errors").and_then(Value::as_array)
    }

    /// Returns `data.site.route.node.__typename`, if present.
    ///
    /// Route lookups are polymorphic: the same query resolves categories,
    /// brands, products and pages.
    #[must_use]
    pub fn route_typename(&self) -> Option<&str> {
        self.data()?
            .pointer("/site/route/node/__typename")
            .and_then(Value::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
