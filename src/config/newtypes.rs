//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated BigCommerce store hash.
///
/// The store hash is the short identifier found in a store's API path
/// (`https://api.bigcommerce.com/stores/{hash}/v3`). It is used to derive the
/// storefront GraphQL endpoint.
///
/// # Serialization
///
/// `StoreHash` serializes to and deserializes from the bare hash string:
///
/// ```rust
/// use bigcommerce_graphql::StoreHash;
///
/// let hash = StoreHash::new("abc123").unwrap();
/// let json = serde_json::to_string(&hash).unwrap();
/// assert_eq!(json, r#""abc123""#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreHash(String);

impl StoreHash {
    /// Creates a new validated store hash.
    ///
    /// Input is trimmed and lowercased before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreHash`] if the hash is empty or
    /// contains anything other than ASCII letters and digits.
    pub fn new(hash: impl Into<String>) -> Result<Self, ConfigError> {
        let hash = hash.into().trim().to_lowercase();

        if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidStoreHash { hash });
        }

        Ok(Self(hash))
    }
}

impl AsRef<str> for StoreHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StoreHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StoreHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated BigCommerce channel id.
///
/// Channel `1` is the store's default storefront channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(u64);

impl ChannelId {
    /// The default storefront channel.
    pub const DEFAULT: Self = Self(1);

    /// Creates a new validated channel id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidChannelId`] for channel `0`.
    pub const fn new(channel_id: u64) -> Result<Self, ConfigError> {
        if channel_id == 0 {
            return Err(ConfigError::InvalidChannelId { channel_id });
        }
        Ok(Self(channel_id))
    }

    /// Returns the numeric channel id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` for the default storefront channel.
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.0 == Self::DEFAULT.0
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated absolute URL.
///
/// Used for the storefront site URL (sent as the `Origin` header) and for
/// endpoint overrides. Trailing slashes are stripped so paths can be joined
/// with `format!("{url}/graphql")`.
///
/// # Example
///
/// ```rust
/// use bigcommerce_graphql::SiteUrl;
///
/// let url = SiteUrl::new("https://shop.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://shop.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("shop.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl SiteUrl {
    /// Creates a new validated URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A BigCommerce storefront API token.
///
/// Storefront tokens authorize anonymous storefront queries. Customer
/// impersonation tokens additionally allow the `X-Bc-Customer-Id` header, which
/// customer-scoped queries (wishlists) depend on.
///
/// # Security
///
/// The [`Debug`] implementation masks token values:
///
/// ```rust
/// use bigcommerce_graphql::AccessToken;
///
/// let token = AccessToken::storefront("secret-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken::Storefront(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum AccessToken {
    /// Storefront API token for anonymous requests.
    Storefront(String),
    /// Customer impersonation token for customer-scoped requests.
    CustomerImpersonation(String),
}

impl AccessToken {
    /// Creates a validated storefront token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn storefront(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken { kind: "Storefront" });
        }
        Ok(Self::Storefront(token))
    }

    /// Creates a validated customer impersonation token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn customer_impersonation(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken {
                kind: "Customer impersonation",
            });
        }
        Ok(Self::CustomerImpersonation(token))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn secret(&self) -> &str {
        match self {
            Self::Storefront(token) | Self::CustomerImpersonation(token) => token,
        }
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.secret())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storefront(_) => f.write_str("AccessToken::Storefront(*****)"),
            Self::CustomerImpersonation(_) => {
                f.write_str("AccessToken::CustomerImpersonation(*****)")
            }
        }
    }
}
