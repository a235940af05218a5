//! HTTP transport for BigCommerce storefront GraphQL.
//!
//! This module provides the [`HttpTransport`] type, the reqwest-backed
//! [`Transport`] implementation with header construction and retry handling.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::GraphqlRequest;
use crate::clients::http_response::GraphqlResponse;
use crate::clients::transport::{Transport, ORIGIN_HEADER};
use crate::config::StorefrontConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for the storefront GraphQL endpoint.
///
/// The transport handles:
/// - Endpoint construction from the store hash and channel
/// - Default headers including `Authorization`, `User-Agent` and `Origin`
/// - Customer-scoped credentials
/// - Automatic retry logic for 429 and 500 responses
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use bigcommerce_graphql::clients::{GraphqlRequest, HttpTransport, Transport};
///
/// let transport = HttpTransport::new(&config);
/// let request = GraphqlRequest::new("query { site { settings { storeName } } }");
/// let response = transport.send(&request, None).await?;
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Full GraphQL endpoint URL.
    url: String,
    /// Headers for anonymous requests.
    default_headers: HashMap<String, String>,
    /// Headers for customer-scoped requests.
    customer_headers: HashMap<String, String>,
    /// Number of attempts per request.
    tries: u32,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a new transport from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}BigCommerce GraphQL Adapter v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(site_url) = config.site_url() {
            default_headers.insert(ORIGIN_HEADER.to_string(), site_url.to_string());
        }

        // Customer impersonation tokens stand in for the storefront token
        let mut customer_headers = default_headers.clone();
        let customer_token = config
            .customer_impersonation_token()
            .unwrap_or_else(|| config.storefront_token());
        customer_headers.insert("Authorization".to_string(), customer_token.bearer());

        default_headers.insert(
            "Authorization".to_string(),
            config.storefront_token().bearer(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: config.graphql_url(),
            default_headers,
            customer_headers,
            tries: config.tries(),
        }
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the headers for anonymous requests.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &GraphqlResponse, status: u16) -> std::time::Duration {
        // For 429: use Retry-After if present, otherwise fixed delay
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|seconds| std::time::Duration::try_from_secs_f64(seconds).ok())
            {
                return delay;
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes the error fields of a response body to JSON.
    fn serialize_error(response: &GraphqlResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for field in ["errors", "error", "title", "detail"] {
            if let Some(value) = response.body.get(field) {
                error_body.insert(field.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn headers(&self, customer_scoped: bool) -> HashMap<String, String> {
        if customer_scoped {
            self.customer_headers.clone()
        } else {
            self.default_headers.clone()
        }
    }

    async fn send(
        &self,
        request: &GraphqlRequest,
        headers: Option<HashMap<String, String>>,
    ) -> Result<GraphqlResponse, HttpError> {
        request.verify()?;

        let headers = headers.unwrap_or_else(|| self.default_headers.clone());
        let payload = serde_json::to_string(request)?;

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self.client.post(&self.url);
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            let res = req_builder.body(payload.clone()).send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else if (200..300).contains(&code) {
                serde_json::from_str(&body_text)?
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    // For 5xx errors, keep the raw body for reporting
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            let response = GraphqlResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);
            let error_reference = response.request_id().map(String::from);

            let should_retry = code == 429 || code == 500;
            if !should_retry || (tries >= self.tries && self.tries == 1) {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference,
                    body: response.body,
                    headers: response.headers,
                }));
            }

            if tries >= self.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: self.tries,
                    message: error_message,
                    error_reference,
                    body: response.body,
                    headers: response.headers,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::debug!(
                "Storefront GraphQL request returned {}, retrying in {:?} (attempt {} of {})",
                code,
                delay,
                tries,
                self.tries
            );
            tokio::time::sleep(delay).await;
        }
    }
}
