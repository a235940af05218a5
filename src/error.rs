//! Error types for the BigCommerce GraphQL adapter.
//!
//! This module contains the configuration error type. Transport errors live in
//! [`crate::clients`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_graphql::{StoreHash, ConfigError};
//!
//! let result = StoreHash::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidStoreHash { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building adapter configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Store hash is invalid.
    #[error("Invalid store hash '{hash}'. Expected the lowercase alphanumeric hash from the store's API path (e.g., 'abc123xyz').")]
    InvalidStoreHash {
        /// The invalid hash that was provided.
        hash: String,
    },

    /// Access token cannot be empty.
    #[error("{kind} token cannot be empty. Please provide a valid BigCommerce API token.")]
    EmptyAccessToken {
        /// Which token was empty.
        kind: &'static str,
    },

    /// Channel id is invalid.
    #[error("Invalid channel id {channel_id}. Channel ids start at 1.")]
    InvalidChannelId {
        /// The invalid channel id that was provided.
        channel_id: u64,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// URL is invalid.
    #[error("Invalid URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://shop.example.com').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
