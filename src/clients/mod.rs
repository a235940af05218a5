//! Transport types for BigCommerce storefront GraphQL communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The seam the request dispatcher sends payloads through
//! - [`HttpTransport`]: The reqwest-backed transport
//! - [`GraphqlRequest`]: A `{query, variables}` payload
//! - [`GraphqlResponse`]: A parsed response envelope
//! - [`HttpError`]: Transport error type
//!
//! # Retry Behavior
//!
//! [`HttpTransport`] implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`StorefrontConfigBuilder::tries`](crate::StorefrontConfigBuilder::tries).

mod errors;
mod http_request;
mod http_response;
mod http_transport;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_request::GraphqlRequest;
pub use http_response::GraphqlResponse;
pub use http_transport::{HttpTransport, RETRY_WAIT_TIME, SDK_VERSION};
pub use transport::{Transport, CUSTOMER_ID_HEADER, ORIGIN_HEADER};
