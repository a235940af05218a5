//! Request dispatcher for BigCommerce storefront operations.
//!
//! This module provides the [`GraphqlProcessor`] type: each method selects a
//! query template, wraps its variables and sends the payload through the
//! configured [`Transport`].
//!
//! # Result Conventions
//!
//! - `Ok(None)`: the response had no `data` (or a required identifier was
//!   empty and no request was made).
//! - `Ok(Some(response))`: the full response envelope.
//! - `Err(HttpError)`: transport failures propagate uncaught.
//!
//! [`get_category_tree`](GraphqlProcessor::get_category_tree) and
//! [`get_brands`](GraphqlProcessor::get_brands) differ: they report failures to
//! the [`EventSink`] and return `None` instead of an error.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::clients::{
    GraphqlRequest, GraphqlResponse, HttpError, HttpTransport, Transport, CUSTOMER_ID_HEADER,
    ORIGIN_HEADER,
};
use crate::config::StorefrontConfig;
use crate::cursor::{CursorStore, InMemoryCursorStore, HEADLESS_CURSOR};
use crate::events::{EventSink, ImportErrorContext, LogLevel, TracingEventSink};
use crate::graphql::queries::{QueryFamily, QueryRegistry};
use crate::graphql::taxonomy::Taxonomy;

/// Default page size for product and brand listings.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Default page size for the product loop.
pub const DEFAULT_LOOP_LIMIT: u32 = 12;

/// Dispatcher for storefront GraphQL operations.
///
/// # Thread Safety
///
/// `GraphqlProcessor` is `Send + Sync`; every operation takes `&self`.
///
/// # Example
///
/// ```rust,ignore
/// use bigcommerce_graphql::{GraphqlProcessor, StorefrontConfig, AccessToken, StoreHash};
///
/// let config = StorefrontConfig::builder()
///     .store_hash(StoreHash::new("abc123").unwrap())
///     .storefront_token(AccessToken::storefront("token").unwrap())
///     .build()
///     .unwrap();
///
/// let processor = GraphqlProcessor::from_config(&config);
///
/// if let Some(response) = processor.request_terms("summer-shoes", "brand").await? {
///     println!("Brand: {}", response.body["data"]["site"]["route"]["node"]["name"]);
/// }
/// ```
pub struct GraphqlProcessor {
    transport: Arc<dyn Transport>,
    queries: QueryRegistry,
    cursors: Arc<dyn CursorStore>,
    events: Arc<dyn EventSink>,
}

// Verify GraphqlProcessor is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlProcessor>();
};

impl std::fmt::Debug for GraphqlProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlProcessor")
            .field("queries", &self.queries)
            .finish_non_exhaustive()
    }
}

impl GraphqlProcessor {
    /// Creates a processor over `transport` and `queries`.
    ///
    /// Cursors are read from an empty [`InMemoryCursorStore`] and events go to
    /// [`TracingEventSink`] until replaced with
    /// [`with_cursor_store`](Self::with_cursor_store) and
    /// [`with_event_sink`](Self::with_event_sink).
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, queries: QueryRegistry) -> Self {
        Self {
            transport,
            queries,
            cursors: Arc::new(InMemoryCursorStore::new()),
            events: Arc::new(TracingEventSink),
        }
    }

    /// Creates a processor with an [`HttpTransport`] and the bundled templates.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(
            Arc::new(HttpTransport::new(config)),
            QueryRegistry::default(),
        )
    }

    /// Replaces the cursor store.
    #[must_use]
    pub fn with_cursor_store(mut self, cursors: Arc<dyn CursorStore>) -> Self {
        self.cursors = cursors;
        self
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Returns the query registry.
    #[must_use]
    pub const fn queries(&self) -> &QueryRegistry {
        &self.queries
    }

    /// Looks up a category or brand by slug.
    ///
    /// The category template is used only for [`Taxonomy::Category`]; every
    /// other taxonomy uses the brand template. The response is kept only if
    /// the resolved node's lower-cased `__typename` equals the taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the transport fails.
    pub async fn request_terms(
        &self,
        slug: &str,
        taxonomy: impl Into<Taxonomy>,
    ) -> Result<Option<GraphqlResponse>, HttpError> {
        let taxonomy = taxonomy.into();
        let terms = self.queries.terms();
        let query = if taxonomy.uses_category_template() {
            terms.category_query()
        } else {
            terms.brand_query()
        };

        let request = GraphqlRequest::new(query).variable("urlPath", format!("/{slug}"));

        let Some(response) = self
            .dispatch(QueryFamily::Terms, "request_terms", &request, None)
            .await?
        else {
            return Ok(None);
        };

        let matches = response
            .route_typename()
            .is_some_and(|typename| taxonomy.matches_typename(typename));
        if !matches {
            tracing::debug!(
                "Route /{} resolved to {:?}, not {}",
                slug,
                response.route_typename(),
                taxonomy
            );
            return Ok(None);
        }

        Ok(Some(response))
    }

    /// Fetches a product page starting at the persisted headless-import cursor.
    ///
    /// The cursor is read from the cursor store under [`HEADLESS_CURSOR`]; a
    /// missing value starts from the first page.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the transport fails.
    pub async fn request_paginated_products(
        &self,
        page_size: u32,
    ) -> Result<Option<GraphqlResponse>, HttpError> {
        let cursor = self.cursors.read(HEADLESS_CURSOR).unwrap_or_default();
        let request = GraphqlRequest::new(self.queries.product().paginated_products_query())
            .variable("pageSize", page_size)
            .variable("cursor", cursor);

        self.dispatch(
            QueryFamily::Product,
            "request_paginated_products",
            &request,
            None,
        )
        .await
    }

    /// Fetches a single product by slug.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the transport fails.
    pub async fn request_product(&self, slug: &str) -> Result<Option<GraphqlResponse>, HttpError> {
        let request = GraphqlRequest::new(self.queries.product().product_query())
            .variable("path", format!("/{slug}"));

        self.dispatch(QueryFamily::Product, "request_product", &request, None)
            .await
    }

    /// Fetches reviews for a product.
    ///
    /// Product id `0` returns `Ok(None)` without a request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the transport fails.
    pub async fn request_product_reviews(
        &self,
        product_id: u64,
    ) -> Result<Option<GraphqlResponse>, HttpError> {
        if product_id == 0 {
            tracing::debug!("Skipping product reviews request: empty product id");
            return Ok(None);
        }

        let request = GraphqlRequest::new(self.queries.reviews().product_reviews_query())
            .variable("productId", product_id);

        self.dispatch(
            QueryFamily::Reviews,
            "request_product_reviews",
            &request,
            None,
        )
        .await
    }

    /// Fetches a full-detail product page at an explicit cursor.
    ///
    /// An empty cursor starts from the first page.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the transport fails.
    pub async fn products_loop_request(
        &self,
        limit: u32,
        cursor: &str,
    ) -> Result<Option<GraphqlResponse>, HttpError> {
        let request = GraphqlRequest::new(self.queries.product().product_paginated_request_full())
            .variable("pageSize", limit)
            .variable("cursor", cursor);

        self.dispatch(
            QueryFamily::Product,
            "products_loop_request",
            &request,
            None,
        )
        .await
    }

    /// Fetches a customer's wishlists filtered to `entity_ids`.
    ///
    /// `public` selects the public wishlist template. A blank customer id or
    /// an empty id list returns `Ok(None)` without a request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the transport fails.
    pub async fn get_customer_wishlist(
        &self,
        customer_id: &str,
        entity_ids: &[u64],
        public: bool,
    ) -> Result<Option<GraphqlResponse>, HttpError> {
        if is_blank_id(customer_id) || entity_ids.is_empty() {
            tracing::debug!("Skipping wishlist request: empty customer id or entity ids");
            return Ok(None);
        }

        let customer = self.queries.customer();
        let query = if public {
            customer.public_wishlist_query()
        } else {
            customer.wishlist_query()
        };

        let request = GraphqlRequest::new(query).variable("entityIds", entity_ids.to_vec());
        let headers = self.customer_headers(customer_id);

        self.dispatch(
            QueryFamily::Customer,
            "get_customer_wishlist",
            &request,
            Some(headers),
        )
        .await
    }

    /// Fetches all of a customer's wishlists.
    ///
    /// A blank customer id returns `Ok(None)` without a request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the transport fails.
    pub async fn get_customer_wishlists(
        &self,
        customer_id: &str,
    ) -> Result<Option<GraphqlResponse>, HttpError> {
        if is_blank_id(customer_id) {
            tracing::debug!("Skipping wishlists request: empty customer id");
            return Ok(None);
        }

        let request = GraphqlRequest::new(self.queries.customer().wishlists_query());
        let headers = self.customer_headers(customer_id);

        self.dispatch(
            QueryFamily::Customer,
            "get_customer_wishlists",
            &request,
            Some(headers),
        )
        .await
    }

    /// Fetches the category tree.
    ///
    /// Failures are reported to the event sink and yield `None`. A response
    /// without `data` is returned as-is.
    pub async fn get_category_tree(&self) -> Option<GraphqlResponse> {
        let request = GraphqlRequest::new(self.queries.category_tree().category_tree_query());

        self.capture(QueryFamily::CategoryTree, "get_category_tree", &request)
            .await
    }

    /// Fetches a page of brands.
    ///
    /// **Note:** this sends the *category tree* template, not a brand listing
    /// template. The `pageSize` and `cursor` variables are not declared by
    /// that query, and the response is the category tree. Existing callers
    /// depend on this shape, so it is kept as-is.
    ///
    /// Failures are reported to the event sink and yield `None`.
    pub async fn get_brands(&self, cursor: &str, page_size: u32) -> Option<GraphqlResponse> {
        let request = GraphqlRequest::new(self.queries.category_tree().category_tree_query())
            .variable("pageSize", page_size)
            .variable("cursor", cursor);

        self.capture(QueryFamily::CategoryTree, "get_brands", &request).await
    }

    /// Sends a request and normalizes a missing `data` field to `None`.
    async fn dispatch(
        &self,
        family: QueryFamily,
        operation: &'static str,
        request: &GraphqlRequest,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Option<GraphqlResponse>, HttpError> {
        tracing::debug!(
            "Dispatching storefront GraphQL operation {} ({} queries)",
            operation,
            family
        );

        let response = self.transport.send(request, headers).await?;

        if !response.has_data() {
            tracing::debug!("Storefront operation {} returned no data", operation);
            return Ok(None);
        }

        Ok(Some(response))
    }

    /// Sends a request, reporting any failure to the event sink.
    async fn capture(
        &self,
        family: QueryFamily,
        operation: &'static str,
        request: &GraphqlRequest,
    ) -> Option<GraphqlResponse> {
        match self.transport.send(request, None).await {
            Ok(response) => Some(response),
            Err(error) => {
                self.report(family, operation, &error);
                None
            }
        }
    }

    /// Reports a transport failure.
    ///
    /// API errors go to the import error hook with the response body and
    /// headers, then to the debug log. Anything else is logged at debug only.
    fn report(&self, family: QueryFamily, operation: &'static str, error: &HttpError) {
        if let Some((body, headers)) = error.response_metadata() {
            self.events.import_error(
                &error.to_string(),
                ImportErrorContext::new(body.clone(), headers.clone()),
            );
        }

        self.events.log(
            LogLevel::Debug,
            &format!("{operation} failed: {error:?}"),
            json!({ "operation": operation, "family": family.as_str() }),
        );
    }

    /// Builds headers for a customer-scoped request.
    fn customer_headers(&self, customer_id: &str) -> HashMap<String, String> {
        let mut headers = self.transport.headers(true);
        headers.retain(|name, _| {
            !name.eq_ignore_ascii_case(ORIGIN_HEADER) && !name.eq_ignore_ascii_case(CUSTOMER_ID_HEADER)
        });
        headers.insert(CUSTOMER_ID_HEADER.to_string(), customer_id.to_string());
        headers
    }
}

/// Returns `true` for identifiers that count as absent: empty or `"0"`.
fn is_blank_id(id: &str) -> bool {
    id.is_empty() || id == "0"
}
