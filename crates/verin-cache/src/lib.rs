//! Type-safe key-value persistence for the Verin storefront.
//!
//! Values are stored as JSON behind a small [`KvStore`] trait with an
//! in-memory backend for tests and a file backend for the CLI. The
//! [`versioned`] module wraps values in a schema-versioned envelope so
//! that older on-disk data can be migrated instead of discarded.
//!
//! # Example
//!
//! ```rust
//! use verin_cache::{Cache, KvStore, MemoryStore, Schema};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Prefs {
//!     currency: String,
//! }
//!
//! impl Schema for Prefs {
//!     const VERSION: u32 = 1;
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set_versioned("prefs", &Prefs { currency: "USD".into() }).unwrap();
//!
//! let prefs: Option<Prefs> = cache.get_versioned("prefs").unwrap();
//! assert_eq!(prefs.unwrap().currency, "USD");
//!
//! let store = cache.into_inner();
//! store.delete("prefs").unwrap();
//! assert!(!store.exists("prefs").unwrap());
//! ```

mod error;
mod file;
mod kv;
mod memory;
pub mod versioned;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;
pub use versioned::Schema;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, Schema};
}
