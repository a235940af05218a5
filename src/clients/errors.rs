//! Transport error types for the BigCommerce GraphQL adapter.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the storefront API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport errors
//!
//! Response and retry errors are "API errors": they carry the response body
//! and headers so callers can report them.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_graphql::clients::HttpError;
//!
//! match transport.send(&request, None).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(e) => println!("Transport failure: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// The message is a JSON serialization of the `errors`/`error`/`title` fields
/// found in the response body, plus an `error_reference` when the response
/// carried an `X-Request-Id`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// The response headers.
    pub headers: HashMap<String, Vec<String>>,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with 429 or 500 responses after all
/// configured attempts.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
    /// The parsed body of the last response.
    pub body: serde_json::Value,
    /// The headers of the last response.
    pub headers: HashMap<String, Vec<String>>,
}

/// Error returned when a GraphQL request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The query string is empty.
    #[error("Cannot send a GraphQL request without a query.")]
    EmptyQuery,
}

/// Unified error type for all transport operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-2xx response received.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retries exceeded.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns `true` for errors raised by the API itself (non-2xx responses
    /// and retry exhaustion), as opposed to local or network failures.
    #[must_use]
    pub const fn is_api_error(&self) -> bool {
        matches!(self, Self::Response(_) | Self::MaxRetries(_))
    }

    /// Returns the response body and headers for API errors.
    #[must_use]
    pub const fn response_metadata(
        &self,
    ) -> Option<(&serde_json::Value, &HashMap<String, Vec<String>>)> {
        match self {
            Self::Response(e) => Some((&e.body, &e.headers)),
            Self::MaxRetries(e) => Some((&e.body, &e.headers)),
            _ => None,
        }
    }

    /// Returns the HTTP status code for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }
}
