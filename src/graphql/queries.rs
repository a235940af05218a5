//! Query templates for the storefront operations.
//!
//! Templates are grouped into operation families. Each family is a trait with
//! one getter per template, so hosts can swap the query text for a single
//! family (to request extra fields, say) without touching the others.
//! [`StorefrontQueries`] bundles a default implementation of every family.

use std::fmt;
use std::sync::Arc;

/// Operation families served by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryFamily {
    /// Category and brand lookups by route.
    Terms,
    /// Product fetches and listings.
    Product,
    /// Product reviews.
    Reviews,
    /// Customer-scoped wishlist queries.
    Customer,
    /// The category tree.
    CategoryTree,
}

impl QueryFamily {
    /// All families, in registry order.
    pub const ALL: [Self; 5] = [
        Self::Terms,
        Self::Product,
        Self::Reviews,
        Self::Customer,
        Self::CategoryTree,
    ];

    /// Returns the family key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terms => "terms",
            Self::Product => "product",
            Self::Reviews => "reviews",
            Self::Customer => "customer",
            Self::CategoryTree => "category_tree",
        }
    }
}

impl fmt::Display for QueryFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Templates for looking up categories and brands by URL path.
///
/// Both templates take a `$urlPath: String!` variable.
pub trait TermsQueries: Send + Sync {
    /// Route lookup resolving a category node.
    fn category_query(&self) -> &str;
    /// Route lookup resolving a brand node.
    fn brand_query(&self) -> &str;
}

/// Templates for product fetches.
pub trait ProductQueries: Send + Sync {
    /// Single product by `$path: String!`.
    fn product_query(&self) -> &str;
    /// Product page by `$pageSize: Int!` and `$cursor: String`, summary fields.
    fn paginated_products_query(&self) -> &str;
    /// Product page by `$pageSize: Int!` and `$cursor: String`, full detail.
    fn product_paginated_request_full(&self) -> &str;
}

/// Templates for product reviews.
pub trait ReviewsQueries: Send + Sync {
    /// Reviews for `$productId: Int!`.
    fn product_reviews_query(&self) -> &str;
}

/// Templates for customer-scoped queries.
///
/// These run with customer impersonation credentials and an
/// `X-Bc-Customer-Id` header.
pub trait CustomerQueries: Send + Sync {
    /// The customer's wishlists filtered by `$entityIds: [Int!]`.
    fn wishlist_query(&self) -> &str;
    /// The customer's public wishlists filtered by `$entityIds: [Int!]`.
    fn public_wishlist_query(&self) -> &str;
    /// All of the customer's wishlists.
    fn wishlists_query(&self) -> &str;
}

/// Templates for the category tree.
pub trait CategoryTreeQueries: Send + Sync {
    /// The full category tree.
    fn category_tree_query(&self) -> &str;
}

const PRODUCT_CARD_FRAGMENT: &str = r"
fragment ProductCard on Product {
  entityId
  name
  path
  sku
  brand { entityId name path }
  defaultImage { url(width: 500) altText }
  prices {
    price { value currencyCode }
    salePrice { value currencyCode }
    retailPrice { value currencyCode }
  }
  reviewSummary { numberOfReviews summationOfRatings }
  inventory { isInStock }
}
";

const CATEGORY_QUERY: &str = r"
query LookUpCategory($urlPath: String!) {
  site {
    route(path: $urlPath) {
      node {
        __typename
        id
        ... on Category {
          entityId
          name
          path
          description
          defaultImage { url(width: 1200) altText }
          seo { pageTitle metaDescription metaKeywords }
          breadcrumbs(depth: 10) { edges { node { entityId name path } } }
        }
      }
    }
  }
}
";

const BRAND_QUERY: &str = r"
query LookUpBrand($urlPath: String!) {
  site {
    route(path: $urlPath) {
      node {
        __typename
        id
        ... on Brand {
          entityId
          name
          path
          defaultImage { url(width: 1200) altText }
          seo { pageTitle metaDescription metaKeywords }
        }
      }
    }
  }
}
";

const PRODUCT_QUERY: &str = r"
query ProductByPath($path: String!) {
  site {
    route(path: $path) {
      node {
        __typename
        ... on Product {
          ...ProductCard
          description
          plainTextDescription
          availabilityV2 { status description }
          categories { edges { node { entityId name path } } }
          images { edges { node { url(width: 1200) altText isDefault } } }
          variants(first: 250) {
            edges { node { entityId sku isPurchasable inventory { isInStock } } }
          }
          customFields { edges { node { name value } } }
          seo { pageTitle metaDescription metaKeywords }
        }
      }
    }
  }
}
";

const PAGINATED_PRODUCTS_QUERY: &str = r"
query PaginatedProducts($pageSize: Int!, $cursor: String) {
  site {
    products(first: $pageSize, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      edges { cursor node { ...ProductCard } }
    }
  }
}
";

const PRODUCT_PAGINATED_FULL_QUERY: &str = r"
query PaginatedProductsFull($pageSize: Int!, $cursor: String) {
  site {
    products(first: $pageSize, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      edges {
        cursor
        node {
          ...ProductCard
          description
          categories { edges { node { entityId name path } } }
          images { edges { node { url(width: 1200) altText isDefault } } }
          variants(first: 250) {
            edges { node { entityId sku isPurchasable inventory { isInStock } } }
          }
          customFields { edges { node { name value } } }
        }
      }
    }
  }
}
";

const PRODUCT_REVIEWS_QUERY: &str = r"
query ProductReviews($productId: Int!) {
  site {
    product(entityId: $productId) {
      entityId
      reviewSummary { numberOfReviews summationOfRatings }
      reviews(first: 50) {
        pageInfo { hasNextPage endCursor }
        edges {
          node {
            entityId
            title
            text
            rating
            createdAt { utc }
            author { name }
          }
        }
      }
    }
  }
}
";

const WISHLIST_QUERY: &str = r"
query CustomerWishlist($entityIds: [Int!]) {
  customer {
    entityId
    wishlists(filters: { entityIds: $entityIds }) {
      edges {
        node {
          entityId
          name
          isPublic
          token
          items { edges { node { entityId productEntityId variantEntityId product { ...ProductCard } } } }
        }
      }
    }
  }
}
";

const PUBLIC_WISHLIST_QUERY: &str = r"
query CustomerPublicWishlist($entityIds: [Int!]) {
  customer {
    entityId
    wishlists(filters: { entityIds: $entityIds }) {
      edges {
        node {
          entityId
          name
          isPublic
          token
          items { edges { node { entityId productEntityId variantEntityId } } }
        }
      }
    }
  }
}
";

const WISHLISTS_QUERY: &str = r"
query CustomerWishlists {
  customer {
    entityId
    wishlists {
      edges {
        node {
          entityId
          name
          isPublic
          token
          items { edges { node { entityId productEntityId variantEntityId } } }
        }
      }
    }
  }
}
";

const CATEGORY_TREE_QUERY: &str = r"
query CategoryTree {
  site {
    categoryTree {
      ...CategoryFields
      children {
        ...CategoryFields
        children {
          ...CategoryFields
          children { ...CategoryFields }
        }
      }
    }
  }
}

fragment CategoryFields on CategoryTreeItem {
  entityId
  name
  path
  description
  productCount
  image { url(width: 500) altText }
}
";

/// Joins a query with the fragments it spreads.
fn with_fragments(query: &str, fragments: &[&str]) -> String {
    let mut text = String::from(query.trim());
    for fragment in fragments {
        text.push('\n');
        text.push_str(fragment.trim());
    }
    text
}

/// The bundled BigCommerce storefront templates.
///
/// Implements every family trait.
#[derive(Clone, Debug)]
pub struct StorefrontQueries {
    category: String,
    brand: String,
    product: String,
    paginated_products: String,
    paginated_products_full: String,
    product_reviews: String,
    wishlist: String,
    public_wishlist: String,
    wishlists: String,
    category_tree: String,
}

impl StorefrontQueries {
    /// Builds the bundled templates.
    #[must_use]
    pub fn new() -> Self {
        let card = [PRODUCT_CARD_FRAGMENT];
        Self {
            category: with_fragments(CATEGORY_QUERY, &[]),
            brand: with_fragments(BRAND_QUERY, &[]),
            product: with_fragments(PRODUCT_QUERY, &card),
            paginated_products: with_fragments(PAGINATED_PRODUCTS_QUERY, &card),
            paginated_products_full: with_fragments(PRODUCT_PAGINATED_FULL_QUERY, &card),
            product_reviews: with_fragments(PRODUCT_REVIEWS_QUERY, &[]),
            wishlist: with_fragments(WISHLIST_QUERY, &card),
            public_wishlist: with_fragments(PUBLIC_WISHLIST_QUERY, &[]),
            wishlists: with_fragments(WISHLISTS_QUERY, &[]),
            category_tree: with_fragments(CATEGORY_TREE_QUERY, &[]),
        }
    }
}

impl Default for StorefrontQueries {
    fn default() -> Self {
        Self::new()
    }
}

impl TermsQueries for StorefrontQueries {
    fn category_query(&self) -> &str {
        &self.category
    }

    fn brand_query(&self) -> &str {
        &self.brand
    }
}

impl ProductQueries for StorefrontQueries {
    fn product_query(&self) -> &str {
        &self.product
    }

    fn paginated_products_query(&self) -> &str {
        &self.paginated_products
    }

    fn product_paginated_request_full(&self) -> &str {
        &self.paginated_products_full
    }
}

impl ReviewsQueries for StorefrontQueries {
    fn product_reviews_query(&self) -> &str {
        &self.product_reviews
    }
}

impl CustomerQueries for StorefrontQueries {
    fn wishlist_query(&self) -> &str {
        &self.wishlist
    }

    fn public_wishlist_query(&self) -> &str {
        &self.public_wishlist
    }

    fn wishlists_query(&self) -> &str {
        &self.wishlists
    }
}

impl CategoryTreeQueries for StorefrontQueries {
    fn category_tree_query(&self) -> &str {
        &self.category_tree
    }
}

/// A family-keyed set of query templates, resolved at construction.
///
/// # Example
///
/// ```rust
/// use bigcommerce_graphql::graphql::QueryRegistry;
///
/// let registry = QueryRegistry::default();
/// assert!(registry.terms().category_query().contains("LookUpCategory"));
/// ```
#[derive(Clone)]
pub struct QueryRegistry {
    terms: Arc<dyn TermsQueries>,
    product: Arc<dyn ProductQueries>,
    reviews: Arc<dyn ReviewsQueries>,
    customer: Arc<dyn CustomerQueries>,
    category_tree: Arc<dyn CategoryTreeQueries>,
}

impl QueryRegistry {
    /// Creates a builder starting from the bundled templates.
    #[must_use]
    pub fn builder() -> QueryRegistryBuilder {
        QueryRegistryBuilder::default()
    }

    /// Returns the terms family.
    #[must_use]
    pub fn terms(&self) -> &dyn TermsQueries {
        self.terms.as_ref()
    }

    /// Returns the product family.
    #[must_use]
    pub fn product(&self) -> &dyn ProductQueries {
        self.product.as_ref()
    }

    /// Returns the reviews family.
    #[must_use]
    pub fn reviews(&self) -> &dyn ReviewsQueries {
        self.reviews.as_ref()
    }

    /// Returns the customer family.
    #[must_use]
    pub fn customer(&self) -> &dyn CustomerQueries {
        self.customer.as_ref()
    }

    /// Returns the category tree family.
    #[must_use]
    pub fn category_tree(&self) -> &dyn CategoryTreeQueries {
        self.category_tree.as_ref()
    }
}

impl Default for QueryRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for QueryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRegistry").finish_non_exhaustive()
    }
}

// Verify QueryRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryRegistry>();
};

/// Builder for [`QueryRegistry`].
///
/// Families that are not overridden use [`StorefrontQueries`].
#[derive(Default)]
pub struct QueryRegistryBuilder {
    terms: Option<Arc<dyn TermsQueries>>,
    product: Option<Arc<dyn ProductQueries>>,
    reviews: Option<Arc<dyn ReviewsQueries>>,
    customer: Option<Arc<dyn CustomerQueries>>,
    category_tree: Option<Arc<dyn CategoryTreeQueries>>,
}

impl QueryRegistryBuilder {
    /// Overrides the terms family.
    #[must_use]
    pub fn terms(mut self, queries: Arc<dyn TermsQueries>) -> Self {
        self.terms = Some(queries);
        self
    }

    /// Overrides the product family.
    #[must_use]
    pub fn product(mut self, queries: Arc<dyn ProductQueries>) -> Self {
        self.product = Some(queries);
        self
    }

    /// Overrides the reviews family.
    #[must_use]
    pub fn reviews(mut self, queries: Arc<dyn ReviewsQueries>) -> Self {
        self.reviews = Some(queries);
        self
    }

    /// Overrides the customer family.
    #[must_use]
    pub fn customer(mut self, queries: Arc<dyn CustomerQueries>) -> Self {
        self.customer = Some(queries);
        self
    }

    /// Overrides the category tree family.
    #[must_use]
    pub fn category_tree(mut self, queries: Arc<dyn CategoryTreeQueries>) -> Self {
        self.category_tree = Some(queries);
        self
    }

    /// Builds the registry, filling unset families with the bundled templates.
    #[must_use]
    pub fn build(self) -> QueryRegistry {
        let bundled = Arc::new(StorefrontQueries::new());

        QueryRegistry {
            terms: self.terms.unwrap_or_else(|| bundled.clone()),
            product: self.product.unwrap_or_else(|| bundled.clone()),
            reviews: self.reviews.unwrap_or_else(|| bundled.clone()),
            customer: self.customer.unwrap_or_else(|| bundled.clone()),
            category_tree: self.category_tree.unwrap_or(bundled),
        }
    }
}
