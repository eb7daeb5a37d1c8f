//! Product and variant types.

use std::collections::BTreeMap;

use crate::catalog::{null_as_default, CategoryRef};
use crate::ids::{ProductId, VariantId};
use crate::money::{Currency, Money};
use crate::CommerceError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A product as served by `/api/product/`.
///
/// Prices are kept as exact decimals in the shape the API sends them and
/// converted to [`Money`] when a currency is known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Full description (may contain HTML).
    #[serde(default)]
    pub description: Option<String>,
    /// Selling price.
    pub price: Decimal,
    /// Reference "was" price, shown struck through when above `price`.
    #[serde(default)]
    pub market_price: Option<Decimal>,
    /// Units in stock.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: u32,
    /// Thumbnail path, relative to the media base.
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub thumbnail_alt_description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_popular: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fast_shipping: bool,
    /// Free-form warranty text.
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Selling price in `currency`.
    pub fn unit_price(&self, currency: Currency) -> Result<Money, CommerceError> {
        Money::from_decimal(self.price, currency)
    }

    /// Market price in `currency`, if the product has one.
    pub fn market_price(&self, currency: Currency) -> Result<Option<Money>, CommerceError> {
        self.market_price
            .map(|m| Money::from_decimal(m, currency))
            .transpose()
    }

    /// Whole-percent discount of `price` against `market_price`.
    ///
    /// Zero when there is no market price or it is not above the price.
    pub fn discount_percent(&self) -> u32 {
        let Some(market) = self.market_price else {
            return 0;
        };
        if market <= self.price || market.is_zero() {
            return 0;
        }
        ((market - self.price) / market * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Find a variant by ID.
    pub fn variant(&self, id: VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Check if this product has variants to choose from.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

/// Reject products that cannot be added from a listing.
///
/// A stock of exactly zero means sold out.
pub fn ensure_purchasable(product: &Product) -> Result<(), CommerceError> {
    if product.stock == 0 {
        return Err(CommerceError::OutOfStock(product.name.clone()));
    }
    Ok(())
}

/// A purchasable variant of a product (e.g., "Large / Blue").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Variant price, overriding the product price.
    pub price: Decimal,
    #[serde(default)]
    pub stock: Option<u32>,
    /// Option name to value, e.g. `{"Size": "L"}`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub option_values: BTreeMap<String, String>,
}

impl ProductVariant {
    /// Option values joined for display, e.g. "Blue / L".
    pub fn label(&self) -> String {
        self.option_values
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
