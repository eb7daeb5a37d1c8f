//! Line items and the product data they carry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Product, ProductVariant};
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::money::{Currency, Money};

/// Product data snapshotted into the cart.
///
/// Only what the cart and checkout need is kept; prices are fixed at the
/// moment the product was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartProduct {
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price when no variant overrides it.
    pub price: Money,
    /// Units in stock when added.
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
}

impl CartProduct {
    /// Build from a catalog product.
    pub fn from_product(product: &Product, currency: Currency) -> Result<Self, CommerceError> {
        Ok(Self {
            id: product.id,
            name: product.name.clone(),
            price: product.unit_price(currency)?,
            stock: product.stock,
            slug: Some(product.slug.clone()),
            thumbnail_image: product.thumbnail_image.clone(),
        })
    }

    /// Normalize loosely shaped product JSON.
    ///
    /// Accepts catalog products as well as ad-hoc objects carrying `title`
    /// instead of `name`, string or numeric ids and prices.
    pub fn normalize(value: &Value, currency: Currency) -> Result<Self, CommerceError> {
        let obj = value
            .as_object()
            .ok_or_else(|| invalid("product", "must be an object"))?;

        let id = match obj.get("id") {
            Some(v) => parse_id(v).ok_or_else(|| invalid("id", "must be a positive integer"))?,
            None => return Err(invalid("id", "is required")),
        };

        let name = ["name", "title"]
            .iter()
            .filter_map(|field| obj.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .ok_or_else(|| invalid("name", "is required"))?
            .to_string();

        let price = match obj.get("price") {
            Some(Value::Null) | None => return Err(invalid("price", "is required")),
            Some(v) => parse_price(v, currency).map_err(|reason| invalid("price", reason))?,
        };

        let stock = match obj.get("stock") {
            None | Some(Value::Null) => 0,
            Some(v) => parse_count(v).ok_or_else(|| invalid("stock", "must be a whole number"))?,
        };

        Ok(Self {
            id: ProductId::new(id),
            name,
            price,
            stock,
            slug: optional_str(obj.get("slug")),
            thumbnail_image: optional_str(obj.get("thumbnail_image")),
        })
    }
}

/// The variant chosen for a line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedVariant {
    pub id: VariantId,
    /// Overrides the product price when set.
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub option_values: BTreeMap<String, String>,
}

impl SelectedVariant {
    /// Build from a catalog variant.
    pub fn from_variant(
        variant: &ProductVariant,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            id: variant.id,
            price: Some(Money::from_decimal(variant.price, currency)?),
            option_values: variant.option_values.clone(),
        })
    }

    /// Normalize loosely shaped variant JSON.
    ///
    /// A blank or missing price means "use the product price".
    pub fn normalize(value: &Value, currency: Currency) -> Result<Self, CommerceError> {
        let obj = value
            .as_object()
            .ok_or_else(|| invalid("variant", "must be an object"))?;

        let id = obj
            .get("id")
            .and_then(parse_id)
            .ok_or_else(|| invalid("variant.id", "must be a positive integer"))?;

        let price = match obj.get("price") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => {
                Some(parse_price(v, currency).map_err(|reason| invalid("variant.price", reason))?)
            }
        };

        let option_values = match obj.get("option_values") {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Ok(Self {
            id: VariantId::new(id),
            price,
            option_values,
        })
    }

    /// Option values joined for display, e.g. "Blue / L".
    pub fn label(&self) -> String {
        self.option_values
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Identity of a line item: product plus optional variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
}

impl LineKey {
    pub fn new(product_id: ProductId, variant_id: Option<VariantId>) -> Self {
        Self {
            product_id,
            variant_id,
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_id {
            Some(variant) => write!(f, "{}-{}", self.product_id, variant),
            None => write!(f, "{}-none", self.product_id),
        }
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub product: CartProduct,
    #[serde(default)]
    pub selected_variant: Option<SelectedVariant>,
    /// Always at least 1 while stored in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// The identity key of this item.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id, self.selected_variant.as_ref().map(|v| v.id))
    }

    /// Variant price if set, otherwise the product price.
    pub fn unit_price(&self) -> Money {
        self.selected_variant
            .as_ref()
            .and_then(|v| v.price)
            .unwrap_or(self.product.price)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price()
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }

    /// Whether the quantity is above the stock known when the item was added.
    pub fn exceeds_known_stock(&self) -> bool {
        self.product.stock > 0 && self.quantity > self.product.stock
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> CommerceError {
    CommerceError::InvalidProduct {
        field,
        reason: reason.into(),
    }
}

fn parse_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (id > 0).then_some(id)
}

fn parse_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_price(value: &Value, currency: Currency) -> Result<Money, &'static str> {
    let money = match value {
        Value::String(s) => Money::parse(s, currency),
        Value::Number(n) => Money::parse(&n.to_string(), currency),
        _ => return Err("must be a decimal string or number"),
    }
    .map_err(|_| "must be a decimal amount")?;

    if money.is_negative() {
        return Err("must not be negative");
    }
    Ok(money)
}

fn optional_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
