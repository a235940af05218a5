//! The transport seam between the request dispatcher and HTTP.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::GraphqlRequest;
use crate::clients::http_response::GraphqlResponse;

/// Header carrying the customer id on customer-scoped requests.
pub const CUSTOMER_ID_HEADER: &str = "X-Bc-Customer-Id";

/// Header carrying the storefront origin on anonymous requests.
pub const ORIGIN_HEADER: &str = "Origin";

/// Sends GraphQL payloads to the storefront API.
///
/// [`HttpTransport`](crate::clients::HttpTransport) is the reqwest-backed
/// implementation. Tests and hosts with their own HTTP stack can provide
/// another.
///
/// # Implementing the trait
///
/// ```ignore
/// use std::collections::HashMap;
/// use async_trait::async_trait;
/// use bigcommerce_graphql::clients::{GraphqlRequest, GraphqlResponse, HttpError, Transport};
///
/// struct Canned(serde_json::Value);
///
/// #[async_trait]
/// impl Transport for Canned {
///     fn headers(&self, _customer_scoped: bool) -> HashMap<String, String> {
///         HashMap::new()
///     }
///
///     async fn send(
///         &self,
///         _request: &GraphqlRequest,
///         _headers: Option<HashMap<String, String>>,
///     ) -> Result<GraphqlResponse, HttpError> {
///         Ok(GraphqlResponse::from_body(self.0.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the base header set for a request.
    ///
    /// `customer_scoped` selects the credentials used for customer-scoped
    /// requests. Callers may add or remove entries before passing the map
    /// back to [`send`](Self::send).
    fn headers(&self, customer_scoped: bool) -> HashMap<String, String>;

    /// Sends a request.
    ///
    /// When `headers` is `None` the transport uses
    /// [`headers(false)`](Self::headers). When it is `Some`, the map is used
    /// as the complete header set.
    async fn send(
        &self,
        request: &GraphqlRequest,
        headers: Option<HashMap<String, String>>,
    ) -> Result<GraphqlResponse, HttpError>;
}
