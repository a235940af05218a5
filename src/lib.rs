//! # BigCommerce Storefront GraphQL Adapter
//!
//! Builds GraphQL requests for common BigCommerce storefront operations and
//! sends them through a pluggable transport.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`StorefrontConfig`] and [`StorefrontConfigBuilder`]
//! - Validated newtypes for store hashes, channels, URLs and tokens
//! - A reqwest-backed [`HttpTransport`] with retry handling
//! - [`GraphqlProcessor`] for category/brand lookups, product listings,
//!   reviews, customer wishlists, the category tree and brands
//! - A [`QueryRegistry`] of replaceable query templates
//! - [`EventSink`] and [`CursorStore`] seams for host integration
//!
//! ## Quick Start
//!
//! ```rust
//! use bigcommerce_graphql::{AccessToken, SiteUrl, StoreHash, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .storefront_token(AccessToken::storefront("storefront-token").unwrap())
//!     .customer_impersonation_token(
//!         AccessToken::customer_impersonation("impersonation-token").unwrap(),
//!     )
//!     .site_url(SiteUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bigcommerce_graphql::{GraphqlProcessor, InMemoryCursorStore, HEADLESS_CURSOR};
//!
//! let cursors = Arc::new(InMemoryCursorStore::new());
//! let processor = GraphqlProcessor::from_config(&config).with_cursor_store(cursors.clone());
//!
//! // Category lookup: `None` when the slug resolves to something else
//! let category = processor.request_terms("summer-shoes", "category").await?;
//!
//! // Customer-scoped request: sends X-Bc-Customer-Id, never Origin
//! let wishlist = processor.get_customer_wishlist("42", &[77, 78], false).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod graphql;

pub use config::{
    AccessToken, ChannelId, SiteUrl, StoreHash, StorefrontConfig, StorefrontConfigBuilder,
};
pub use error::ConfigError;

pub use clients::{
    GraphqlRequest, GraphqlResponse, HttpError, HttpResponseError, HttpTransport,
    InvalidHttpRequestError, MaxHttpRetriesExceededError, Transport,
};

pub use cursor::{CursorStore, InMemoryCursorStore, HEADLESS_CURSOR};
pub use events::{EventSink, ImportErrorContext, LogLevel, TracingEventSink};

pub use graphql::{GraphqlProcessor, QueryFamily, QueryRegistry, StorefrontQueries, Taxonomy};
