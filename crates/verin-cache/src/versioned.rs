//! Schema-versioned envelopes for persisted values.
//!
//! Values are written as
//!
//! ```json
//! {"schema_version": 1, "saved_at": 1760000000, "data": { ... }}
//! ```
//!
//! Anything read back without that envelope is treated as schema version 0
//! and handed to [`Schema::migrate`].

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::CacheError;

/// A type that can be persisted with a schema version.
pub trait Schema: Serialize + DeserializeOwned {
    /// The version written by this build.
    const VERSION: u32;

    /// Upgrade data written by an older version.
    ///
    /// The default refuses every migration.
    fn migrate(from_version: u32, data: Value) -> Result<Self, CacheError> {
        let _ = data;
        Err(CacheError::Migration {
            from: from_version,
            reason: "no migration available".to_string(),
        })
    }
}

/// The stored wrapper around a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub schema_version: u32,
    /// When the value was written (Unix timestamp).
    #[serde(default)]
    pub saved_at: i64,
    pub data: T,
}

/// Serialize `value` inside an envelope stamped with `T::VERSION`.
pub fn encode<T: Schema>(value: &T) -> Result<Vec<u8>, CacheError> {
    let envelope = Envelope {
        schema_version: T::VERSION,
        saved_at: chrono::Utc::now().timestamp(),
        data: value,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Deserialize an envelope, migrating older versions.
///
/// Fails with [`CacheError::UnsupportedVersion`] for versions newer than
/// `T::VERSION`.
pub fn decode<T: Schema>(bytes: &[u8]) -> Result<T, CacheError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let (version, data) = split_envelope(value);

    match version.cmp(&T::VERSION) {
        Ordering::Equal => Ok(serde_json::from_value(data)?),
        Ordering::Less => {
            tracing::debug!(from = version, to = T::VERSION, "migrating stored value");
            T::migrate(version, data)
        }
        Ordering::Greater => Err(CacheError::UnsupportedVersion {
            found: version,
            supported: T::VERSION,
        }),
    }
}

fn split_envelope(value: Value) -> (u32, Value) {
    if let Value::Object(mut map) = value {
        let version = map
            .get("schema_version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok());
        if let (Some(version), true) = (version, map.contains_key("data")) {
            let data = map.remove("data").unwrap_or(Value::Null);
            return (version, data);
        }
        return (0, Value::Object(map));
    }
    (0, value)
}
