//! Read access to externally persisted pagination cursors.
//!
//! The headless product import stores its continuation cursor between runs.
//! The dispatcher reads it when listing products but never writes it.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Key under which the headless product import stores its cursor.
pub const HEADLESS_CURSOR: &str = "bigcommerce_headless_import_cursor";

/// A key/value store of cursor tokens.
pub trait CursorStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
}

/// A thread-safe in-memory [`CursorStore`].
///
/// # Example
///
/// ```rust
/// use bigcommerce_graphql::{CursorStore, InMemoryCursorStore, HEADLESS_CURSOR};
///
/// let store = InMemoryCursorStore::new();
/// assert_eq!(store.read(HEADLESS_CURSOR), None);
///
/// store.set(HEADLESS_CURSOR, "YXJyYXljb25uZWN0aW9uOjQ5");
/// assert_eq!(store.read(HEADLESS_CURSOR).as_deref(), Some("YXJyYXljb25uZWN0aW9uOjQ5"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCursorStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryCursorStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Removes the value stored under `key`.
    pub fn clear(&self, key: &str) {
        self.values.write().remove(key);
    }
}

impl CursorStore for InMemoryCursorStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}
