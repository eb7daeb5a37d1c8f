//! Product catalog module.
//!
//! Contains the read-only product and category records served by the
//! storefront API.

mod category;
mod product;

pub use category::{Category, CategoryRef};
pub use product::{ensure_purchasable, Product, ProductVariant};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
