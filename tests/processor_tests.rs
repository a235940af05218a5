//! Integration tests for the storefront request dispatcher.
//!
//! These tests drive [`GraphqlProcessor`] through an in-process transport that
//! records every request, and an event sink that records every report.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigcommerce_graphql::clients::{CUSTOMER_ID_HEADER, ORIGIN_HEADER};
use bigcommerce_graphql::graphql::{
    CategoryTreeQueries, CustomerQueries, ProductQueries, TermsQueries, DEFAULT_LOOP_LIMIT,
    DEFAULT_PAGE_SIZE,
};
use bigcommerce_graphql::{
    EventSink, GraphqlProcessor, GraphqlRequest, GraphqlResponse, HttpError, HttpResponseError,
    ImportErrorContext, InMemoryCursorStore, InvalidHttpRequestError, LogLevel, QueryRegistry,
    StorefrontQueries, Taxonomy, Transport, HEADLESS_CURSOR,
};
use serde_json::{json, Value};

// ============================================================================
// Test Doubles
// ============================================================================

enum Reply {
    Body(Value),
    ApiError,
    LocalError,
}

struct RecordingTransport {
    reply: Reply,
    sent: Mutex<Vec<(GraphqlRequest, Option<HashMap<String, String>>)>>,
}

impl RecordingTransport {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn last_request(&self) -> GraphqlRequest {
        self.sent.lock().unwrap().last().unwrap().0.clone()
    }

    fn last_headers(&self) -> Option<HashMap<String, String>> {
        self.sent.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn headers(&self, customer_scoped: bool) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(ORIGIN_HEADER.to_string(), "https://shop.example.com".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        let token = if customer_scoped {
            "Bearer impersonation"
        } else {
            "Bearer storefront"
        };
        headers.insert("Authorization".to_string(), token.to_string());
        headers
    }

    async fn send(
        &self,
        request: &GraphqlRequest,
        headers: Option<HashMap<String, String>>,
    ) -> Result<GraphqlResponse, HttpError> {
        self.sent.lock().unwrap().push((request.clone(), headers));

        match &self.reply {
            Reply::Body(body) => Ok(GraphqlResponse::from_body(body.clone())),
            Reply::ApiError => {
                let mut headers = HashMap::new();
                headers.insert("x-request-id".to_string(), vec!["req-500".to_string()]);
                Err(HttpError::Response(HttpResponseError {
                    code: 500,
                    message: r#"{"title":"Internal Server Error"}"#.to_string(),
                    error_reference: Some("req-500".to_string()),
                    body: json!({"title": "Internal Server Error"}),
                    headers,
                }))
            }
            Reply::LocalError => Err(HttpError::InvalidRequest(
                InvalidHttpRequestError::EmptyQuery,
            )),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    import_errors: Mutex<Vec<(String, ImportErrorContext)>>,
    logs: Mutex<Vec<(LogLevel, String, Value)>>,
}

impl EventSink for RecordingSink {
    fn import_error(&self, message: &str, context: ImportErrorContext) {
        self.import_errors
            .lock()
            .unwrap()
            .push((message.to_string(), context));
    }

    fn log(&self, level: LogLevel, message: &str, context: Value) {
        self.logs
            .lock()
            .unwrap()
            .push((level, message.to_string(), context));
    }
}

fn processor_with(reply: Reply) -> (GraphqlProcessor, Arc<RecordingTransport>, Arc<RecordingSink>) {
    let transport = RecordingTransport::new(reply);
    let sink = Arc::new(RecordingSink::default());
    let processor = GraphqlProcessor::new(transport.clone(), QueryRegistry::default())
        .with_event_sink(sink.clone());
    (processor, transport, sink)
}

fn route_body(typename: &str) -> Value {
    json!({
        "data": {
            "site": {
                "route": {
                    "node": {"__typename": typename, "entityId": 23, "name": "Summer Shoes"}
                }
            }
        }
    })
}

fn queries() -> StorefrontQueries {
    StorefrontQueries::new()
}

// ============================================================================
// Terms Lookup
// ============================================================================

#[tokio::test]
async fn test_request_terms_returns_response_for_matching_brand() {
    let (processor, transport, _) = processor_with(Reply::Body(route_body("Brand")));

    let result = processor
        .request_terms("summer-shoes", "brand")
        .await
        .unwrap();

    let response = result.expect("brand node should be returned");
    assert_eq!(response.body, route_body("Brand"));

    let request = transport.last_request();
    assert_eq!(request.query, queries().brand_query());
    assert_eq!(request.variables["urlPath"], "/summer-shoes");
}

#[tokio::test]
async fn test_request_terms_rejects_mismatched_typename() {
    let (processor, _, _) = processor_with(Reply::Body(route_body("Category")));

    let result = processor
        .request_terms("summer-shoes", "brand")
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_request_terms_defaults_to_category_template() {
    let (processor, transport, _) = processor_with(Reply::Body(route_body("Category")));

    let result = processor
        .request_terms("shoes", Taxonomy::default())
        .await
        .unwrap();

    assert!(result.is_some());
    assert_eq!(transport.last_request().query, queries().category_query());
}

#[tokio::test]
async fn test_request_terms_uses_brand_template_for_any_non_category_taxonomy() {
    for taxonomy in ["brand", "tag", "Category", ""] {
        let (processor, transport, _) = processor_with(Reply::Body(route_body("Category")));

        let result = processor.request_terms("shoes", taxonomy).await.unwrap();

        assert_eq!(
            transport.last_request().query,
            queries().brand_query(),
            "taxonomy {taxonomy:?} should select the brand template"
        );
        assert!(result.is_none(), "taxonomy {taxonomy:?} cannot match Category");
    }
}

#[tokio::test]
async fn test_request_terms_typename_comparison_is_case_insensitive() {
    let (processor, _, _) = processor_with(Reply::Body(route_body("CATEGORY")));

    let result = processor.request_terms("shoes", "category").await.unwrap();

    assert!(result.is_some());
}

#[tokio::test]
async fn test_request_terms_returns_none_without_data() {
    let (processor, _, _) = processor_with(Reply::Body(json!({"errors": [{"message": "x"}]})));

    let result = processor.request_terms("shoes", "category").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_request_terms_returns_none_when_route_has_no_node() {
    let (processor, _, _) =
        processor_with(Reply::Body(json!({"data": {"site": {"route": {"node": null}}}})));

    let result = processor.request_terms("missing", "category").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_request_terms_propagates_transport_errors() {
    let (processor, _, sink) = processor_with(Reply::ApiError);

    let result = processor.request_terms("shoes", "category").await;

    assert!(matches!(result, Err(HttpError::Response(_))));
    assert!(sink.import_errors.lock().unwrap().is_empty());
    assert!(sink.logs.lock().unwrap().is_empty());
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_paginated_products_reads_persisted_cursor() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {"site": {}}})));
    let cursors = Arc::new(InMemoryCursorStore::new());
    cursors.set(HEADLESS_CURSOR, "YXJyYXljb25uZWN0aW9uOjQ5");
    let processor = processor.with_cursor_store(cursors);

    let result = processor
        .request_paginated_products(DEFAULT_PAGE_SIZE)
        .await
        .unwrap();

    assert!(result.is_some());
    let request = transport.last_request();
    assert_eq!(request.query, queries().paginated_products_query());
    assert_eq!(request.variables["pageSize"], 50);
    assert_eq!(request.variables["cursor"], "YXJyYXljb25uZWN0aW9uOjQ5");
}

#[tokio::test]
async fn test_paginated_products_without_cursor_sends_empty_string() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({})));

    let result = processor.request_paginated_products(10).await.unwrap();

    assert!(result.is_none());
    let request = transport.last_request();
    assert_eq!(request.variables["pageSize"], 10);
    assert_eq!(request.variables["cursor"], "");
}

#[tokio::test]
async fn test_request_product_uses_slug_path() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {"site": {}}})));

    let result = processor.request_product("red-dress").await.unwrap();

    assert!(result.is_some());
    let request = transport.last_request();
    assert_eq!(request.query, queries().product_query());
    assert_eq!(request.variables["path"], "/red-dress");
}

#[tokio::test]
async fn test_request_product_returns_none_for_null_data() {
    let (processor, _, _) = processor_with(Reply::Body(json!({"data": null})));

    assert!(processor.request_product("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn test_products_loop_request_passes_explicit_cursor() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    processor
        .products_loop_request(DEFAULT_LOOP_LIMIT, "abc")
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.query, queries().product_paginated_request_full());
    assert_eq!(request.variables["pageSize"], 12);
    assert_eq!(request.variables["cursor"], "abc");
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_product_reviews_with_empty_id_never_calls_transport() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    let result = processor.request_product_reviews(0).await.unwrap();

    assert!(result.is_none());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_product_reviews_sends_product_id() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    let result = processor.request_product_reviews(111).await.unwrap();

    assert!(result.is_some());
    assert_eq!(transport.last_request().variables["productId"], 111);
}

#[tokio::test]
async fn test_product_reviews_returns_none_without_data() {
    for body in [json!({}), json!({"data": null})] {
        let (processor, transport, _) = processor_with(Reply::Body(body));

        let result = processor.request_product_reviews(111).await.unwrap();

        assert!(result.is_none());
        assert_eq!(transport.calls(), 1);
    }
}

// ============================================================================
// Customer Wishlists
// ============================================================================

#[tokio::test]
async fn test_wishlist_with_empty_entity_ids_never_calls_transport() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    let result = processor.get_customer_wishlist("42", &[], false).await.unwrap();

    assert!(result.is_none());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_wishlist_with_empty_customer_id_never_calls_transport() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    for customer_id in ["", "0"] {
        let result = processor
            .get_customer_wishlist(customer_id, &[1, 2], true)
            .await
            .unwrap();
        assert!(result.is_none());
    }
    assert!(processor.get_customer_wishlists("").await.unwrap().is_none());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_private_wishlist_selects_private_template() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    processor
        .get_customer_wishlist("42", &[7, 8], false)
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.query, queries().wishlist_query());
    assert_eq!(request.variables["entityIds"], json!([7, 8]));
}

#[tokio::test]
async fn test_public_wishlist_selects_public_template() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    processor
        .get_customer_wishlist("42", &[7], true)
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().query,
        queries().public_wishlist_query()
    );
}

#[tokio::test]
async fn test_customer_requests_carry_customer_id_and_no_origin() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    processor
        .get_customer_wishlist("42", &[7], false)
        .await
        .unwrap();
    let wishlist_headers = transport.last_headers().unwrap();

    processor.get_customer_wishlists("42").await.unwrap();
    let wishlists_headers = transport.last_headers().unwrap();

    for headers in [wishlist_headers, wishlists_headers] {
        assert_eq!(headers.get(CUSTOMER_ID_HEADER), Some(&"42".to_string()));
        assert!(!headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(ORIGIN_HEADER)));
        assert_eq!(
            headers.get("Authorization"),
            Some(&"Bearer impersonation".to_string())
        );
        assert_eq!(headers.get("Accept"), Some(&"application/json".to_string()));
    }
}

#[tokio::test]
async fn test_customer_wishlists_sends_empty_variables() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    let result = processor.get_customer_wishlists("42").await.unwrap();

    assert!(result.is_some());
    let request = transport.last_request();
    assert_eq!(request.query, queries().wishlists_query());
    assert!(request.variables.is_empty());
}

#[tokio::test]
async fn test_customer_wishlist_returns_none_without_data() {
    let (processor, _, _) = processor_with(Reply::Body(json!({})));

    assert!(processor
        .get_customer_wishlist("42", &[7], false)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_customer_wishlists_returns_none_without_data() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": null})));

    let result = processor.get_customer_wishlists("42").await.unwrap();

    assert!(result.is_none());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_customer_wishlists_with_zero_id_never_calls_transport() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    let result = processor.get_customer_wishlists("0").await.unwrap();

    assert!(result.is_none());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_whitespace_customer_id_is_sent() {
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    let wishlist = processor
        .get_customer_wishlist("  ", &[7], false)
        .await
        .unwrap();
    let wishlists = processor.get_customer_wishlists("  ").await.unwrap();

    assert!(wishlist.is_some());
    assert!(wishlists.is_some());
    assert_eq!(transport.calls(), 2);
    assert_eq!(
        transport.last_headers().unwrap().get(CUSTOMER_ID_HEADER),
        Some(&"  ".to_string())
    );
}

// ============================================================================
// Category Tree and Brands
// ============================================================================

#[tokio::test]
async fn test_category_tree_reports_api_error_and_returns_none() {
    let (processor, transport, sink) = processor_with(Reply::ApiError);

    let result = processor.get_category_tree().await;

    assert!(result.is_none());
    assert_eq!(transport.calls(), 1);

    let import_errors = sink.import_errors.lock().unwrap();
    assert_eq!(import_errors.len(), 1);
    let (message, context) = &import_errors[0];
    assert!(message.contains("Internal Server Error"));
    assert_eq!(context.response["title"], "Internal Server Error");
    assert_eq!(context.headers["x-request-id"], vec!["req-500".to_string()]);

    let logs = sink.logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].0, LogLevel::Debug);
}

#[tokio::test]
async fn test_brands_reports_api_error_and_returns_none() {
    let (processor, _, sink) = processor_with(Reply::ApiError);

    let result = processor.get_brands("", DEFAULT_PAGE_SIZE).await;

    assert!(result.is_none());
    assert_eq!(sink.import_errors.lock().unwrap().len(), 1);
    assert_eq!(sink.logs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_category_tree_logs_other_errors_without_metadata() {
    let (processor, _, sink) = processor_with(Reply::LocalError);

    let result = processor.get_category_tree().await;

    assert!(result.is_none());
    assert!(sink.import_errors.lock().unwrap().is_empty());

    let logs = sink.logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    let (level, _, context) = &logs[0];
    assert_eq!(*level, LogLevel::Debug);
    assert!(context.get("response").is_none());
    assert!(context.get("headers").is_none());
}

#[tokio::test]
async fn test_brands_logs_other_errors_without_import_error() {
    let (processor, transport, sink) = processor_with(Reply::LocalError);

    let result = processor.get_brands("", DEFAULT_PAGE_SIZE).await;

    assert!(result.is_none());
    assert_eq!(transport.calls(), 1);
    assert!(sink.import_errors.lock().unwrap().is_empty());

    let logs = sink.logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].0, LogLevel::Debug);
    assert_eq!(logs[0].2["operation"], "get_brands");
    assert_eq!(logs[0].2["family"], "category_tree");
}

#[tokio::test]
async fn test_category_tree_returns_response_even_without_data() {
    let (processor, transport, sink) =
        processor_with(Reply::Body(json!({"errors": [{"message": "x"}]})));

    let result = processor.get_category_tree().await;

    let response = result.expect("wrapped operations return the response as-is");
    assert!(!response.has_data());
    assert!(transport.last_request().variables.is_empty());
    assert!(sink.logs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_brands_sends_category_tree_template() {
    // Brand listing sends the category tree template
    let (processor, transport, _) = processor_with(Reply::Body(json!({"data": {}})));

    processor.get_brands("cursor-1", 25).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.query, queries().category_tree_query());
    assert_eq!(request.variables["pageSize"], 25);
    assert_eq!(request.variables["cursor"], "cursor-1");
}

// ============================================================================
// Registry Overrides
// ============================================================================

struct ShortCustomerQueries;

impl CustomerQueries for ShortCustomerQueries {
    fn wishlist_query(&self) -> &str {
        "query Private { customer { entityId } }"
    }

    fn public_wishlist_query(&self) -> &str {
        "query Public { customer { entityId } }"
    }

    fn wishlists_query(&self) -> &str {
        "query All { customer { entityId } }"
    }
}

#[tokio::test]
async fn test_overridden_family_templates_are_used() {
    let transport = RecordingTransport::new(Reply::Body(json!({"data": {}})));
    let registry = QueryRegistry::builder()
        .customer(Arc::new(ShortCustomerQueries))
        .build();
    let processor = GraphqlProcessor::new(transport.clone(), registry);

    processor
        .get_customer_wishlist("42", &[1], true)
        .await
        .unwrap();
    assert_eq!(
        transport.last_request().query,
        "query Public { customer { entityId } }"
    );

    processor.request_product("hat").await.unwrap();
    assert_eq!(transport.last_request().query, queries().product_query());
}
