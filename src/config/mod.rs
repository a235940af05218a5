//! Configuration types for the BigCommerce GraphQL adapter.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`StorefrontConfig`]: Settings for storefront GraphQL communication
//! - [`StorefrontConfigBuilder`]: A builder for constructing [`StorefrontConfig`] instances
//! - [`StoreHash`]: A validated store hash newtype
//! - [`ChannelId`]: A validated channel id
//! - [`SiteUrl`]: A validated absolute URL
//! - [`AccessToken`]: A storefront or customer impersonation token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_graphql::{AccessToken, StoreHash, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .storefront_token(AccessToken::storefront("token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.graphql_url(), "https://store-abc123.mybigcommerce.com/graphql");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ChannelId, SiteUrl, StoreHash};

use crate::error::ConfigError;

/// Configuration for storefront GraphQL requests.
///
/// # Thread Safety
///
/// `StorefrontConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    store_hash: StoreHash,
    channel_id: ChannelId,
    storefront_token: AccessToken,
    customer_impersonation_token: Option<AccessToken>,
    site_url: Option<SiteUrl>,
    endpoint: Option<SiteUrl>,
    user_agent_prefix: Option<String>,
    tries: u32,
}

impl StorefrontConfig {
    /// Creates a new builder for constructing a `StorefrontConfig`.
    #[must_use]
    pub fn builder() -> StorefrontConfigBuilder {
        StorefrontConfigBuilder::new()
    }

    /// Returns the store hash.
    #[must_use]
    pub const fn store_hash(&self) -> &StoreHash {
        &self.store_hash
    }

    /// Returns the channel id.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Returns the storefront token.
    #[must_use]
    pub const fn storefront_token(&self) -> &AccessToken {
        &self.storefront_token
    }

    /// Returns the customer impersonation token, if configured.
    #[must_use]
    pub const fn customer_impersonation_token(&self) -> Option<&AccessToken> {
        self.customer_impersonation_token.as_ref()
    }

    /// Returns the storefront site URL, if configured.
    ///
    /// When set, it is sent as the `Origin` header on anonymous requests.
    #[must_use]
    pub const fn site_url(&self) -> Option<&SiteUrl> {
        self.site_url.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the number of attempts per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the storefront GraphQL endpoint.
    ///
    /// Uses the endpoint override when configured. Otherwise the default
    /// channel maps to `https://store-{hash}.mybigcommerce.com/graphql` and
    /// other channels to `https://store-{hash}-{channel}.mybigcommerce.com/graphql`.
    #[must_use]
    pub fn graphql_url(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.to_string();
        }

        if self.channel_id.is_default() {
            format!("https://store-{}.mybigcommerce.com/graphql", self.store_hash)
        } else {
            format!(
                "https://store-{}-{}.mybigcommerce.com/graphql",
                self.store_hash, self.channel_id
            )
        }
    }
}

// Verify StorefrontConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontConfig>();
};

/// Builder for constructing [`StorefrontConfig`] instances.
///
/// Required fields are `store_hash` and `storefront_token`.
///
/// # Defaults
///
/// - `channel_id`: [`ChannelId::DEFAULT`]
/// - `customer_impersonation_token`: `None`
/// - `site_url`: `None`
/// - `endpoint`: `None` (derived from store hash and channel)
/// - `user_agent_prefix`: `None`
/// - `tries`: `1`
#[derive(Debug, Default)]
pub struct StorefrontConfigBuilder {
    store_hash: Option<StoreHash>,
    channel_id: Option<ChannelId>,
    storefront_token: Option<AccessToken>,
    customer_impersonation_token: Option<AccessToken>,
    site_url: Option<SiteUrl>,
    endpoint: Option<SiteUrl>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl StorefrontConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store hash (required).
    #[must_use]
    pub fn store_hash(mut self, hash: StoreHash) -> Self {
        self.store_hash = Some(hash);
        self
    }

    /// Sets the channel id.
    #[must_use]
    pub const fn channel_id(mut self, channel_id: ChannelId) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Sets the storefront token (required).
    #[must_use]
    pub fn storefront_token(mut self, token: AccessToken) -> Self {
        self.storefront_token = Some(token);
        self
    }

    /// Sets the customer impersonation token used for customer-scoped requests.
    #[must_use]
    pub fn customer_impersonation_token(mut self, token: AccessToken) -> Self {
        self.customer_impersonation_token = Some(token);
        self
    }

    /// Sets the storefront site URL.
    #[must_use]
    pub fn site_url(mut self, url: SiteUrl) -> Self {
        self.site_url = Some(url);
        self
    }

    /// Overrides the GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, url: SiteUrl) -> Self {
        self.endpoint = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of attempts per request.
    ///
    /// Values above 1 enable retries on 429 and 500 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`StorefrontConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `store_hash` or
    /// `storefront_token` are not set.
    pub fn build(self) -> Result<StorefrontConfig, ConfigError> {
        let store_hash = self
            .store_hash
            .ok_or(ConfigError::MissingRequiredField {
                field: "store_hash",
            })?;
        let storefront_token =
            self.storefront_token
                .ok_or(ConfigError::MissingRequiredField {
                    field: "storefront_token",
                })?;

        Ok(StorefrontConfig {
            store_hash,
            channel_id: self.channel_id.unwrap_or_default(),
            storefront_token,
            customer_impersonation_token: self.customer_impersonation_token,
            site_url: self.site_url,
            endpoint: self.endpoint,
            user_agent_prefix: self.user_agent_prefix,
            tries: self.tries.unwrap_or(1).max(1),
        })
    }
}
