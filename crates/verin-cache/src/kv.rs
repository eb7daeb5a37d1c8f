//! Key-value store abstraction with automatic serialization.

use std::sync::Arc;

use crate::versioned::{self, Schema};
use crate::CacheError;

/// A byte-oriented key-value store.
///
/// Implementations take `&self` so a store can be shared behind a reference
/// or an `Arc`; any interior locking is the backend's concern.
pub trait KvStore {
    /// Read the raw bytes under `key`, `None` if absent.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the bytes under `key`.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

/// Typed access to a [`KvStore`].
///
/// Values are stored as JSON inside a versioned envelope so older data can be
/// migrated on read.
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value stored in a versioned envelope, migrating older data.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get_versioned<T: Schema>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key)? {
            Some(bytes) => versioned::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Set a value wrapped in a versioned envelope.
    pub fn set_versioned<T: Schema>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = versioned::encode(value)?;
        self.store.set_raw(key, &bytes)
    }

    /// Unwrap the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}
