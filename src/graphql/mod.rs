//! Storefront GraphQL operations.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GraphqlProcessor`]: Dispatches named storefront operations
//! - [`QueryRegistry`]: Family-keyed query templates
//! - [`StorefrontQueries`]: The bundled BigCommerce templates
//! - [`Taxonomy`]: Category or brand restriction for route lookups
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_graphql::graphql::{GraphqlProcessor, DEFAULT_PAGE_SIZE};
//!
//! let processor = GraphqlProcessor::from_config(&config);
//!
//! // Missing data is `None`, not an error
//! match processor.request_paginated_products(DEFAULT_PAGE_SIZE).await? {
//!     Some(page) => println!("{}", page.body["data"]["site"]["products"]["pageInfo"]),
//!     None => println!("No products"),
//! }
//!
//! // The category tree never fails; errors go to the event sink
//! if let Some(tree) = processor.get_category_tree().await {
//!     println!("{}", tree.body);
//! }
//! ```

mod processor;
mod queries;
mod taxonomy;

pub use processor::{GraphqlProcessor, DEFAULT_LOOP_LIMIT, DEFAULT_PAGE_SIZE};
pub use queries::{
    CategoryTreeQueries, CustomerQueries, ProductQueries, QueryFamily, QueryRegistry,
    QueryRegistryBuilder, ReviewsQueries, StorefrontQueries, TermsQueries,
};
pub use taxonomy::Taxonomy;
