//! Persisted cart format.
//!
//! Version 1 stores the [`Cart`] itself inside the `verin_cache` envelope.
//! Version 0 is the earlier unversioned format: a bare JSON array of
//! `{product, quantity, selectedVariant}` records with decimal-string
//! prices and no currency. Those carts are read as USD, which is the only
//! currency that format was ever written with.

use serde_json::Value;
use tracing::warn;
use verin_cache::{CacheError, Schema};

use crate::cart::{Cart, CartProduct, LineItem, SelectedVariant};
use crate::money::Currency;

const LEGACY_CURRENCY: Currency = Currency::USD;

impl Schema for Cart {
    const VERSION: u32 = 1;

    fn migrate(from_version: u32, data: Value) -> Result<Self, CacheError> {
        match from_version {
            0 => migrate_legacy(data),
            other => Err(CacheError::Migration {
                from: other,
                reason: "unknown cart format".to_string(),
            }),
        }
    }
}

fn migrate_legacy(data: Value) -> Result<Cart, CacheError> {
    let Value::Array(records) = data else {
        return Err(CacheError::Migration {
            from: 0,
            reason: "expected an array of cart items".to_string(),
        });
    };

    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match legacy_item(record) {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(reason) => warn!(index, %reason, "dropping unreadable legacy cart item"),
        }
    }

    Cart::from_items(LEGACY_CURRENCY, items).map_err(|e| CacheError::Migration {
        from: 0,
        reason: e.to_string(),
    })
}

fn legacy_item(record: &Value) -> Result<Option<LineItem>, String> {
    let product = record
        .get("product")
        .ok_or_else(|| "missing product".to_string())?;
    let product = CartProduct::normalize(product, LEGACY_CURRENCY).map_err(|e| e.to_string())?;

    let quantity = record
        .get("quantity")
        .and_then(Value::as_i64)
        .ok_or_else(|| "missing or non-integer quantity".to_string())?;
    if quantity <= 0 {
        return Ok(None);
    }
    let quantity = u32::try_from(quantity).map_err(|_| "quantity too large".to_string())?;

    let variant = match record
        .get("selectedVariant")
        .or_else(|| record.get("selected_variant"))
    {
        None | Some(Value::Null) => None,
        Some(v) => Some(SelectedVariant::normalize(v, LEGACY_CURRENCY).map_err(|e| e.to_string())?),
    };

    Ok(Some(LineItem {
        product,
        selected_variant: variant,
        quantity,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ProductId, VariantId};
    use crate::money::Money;
    use serde_json::json;
    use verin_cache::versioned;

    #[test]
    fn test_round_trip_keeps_order() {
        let legacy = json!([
            {"product": {"id": 2, "name": "B", "price": "5.00"}, "quantity": 1, "selectedVariant": null},
            {"product": {"id": 1, "name": "A", "price": "20.00"}, "quantity": 3, "selectedVariant": null}
        ]);
        let cart = migrate_legacy(legacy).unwrap();

        let bytes = versioned::encode(&cart).unwrap();
        let restored: Cart = versioned::decode(&bytes).unwrap();

        assert_eq!(restored, cart);
        let ids: Vec<u64> = restored.items().iter().map(|i| i.product.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_round_trip_keeps_variant_fields() {
        let shirt = CartProduct::normalize(
            &json!({"id": 12, "name": "Shirt", "price": "20.00", "stock": 4}),
            Currency::USD,
        )
        .unwrap();
        let large = SelectedVariant::normalize(
            &json!({"id": 3, "price": "22.50", "option_values": {"Size": "L", "Color": "Sand"}}),
            Currency::USD,
        )
        .unwrap();

        let mut cart = Cart::new(Currency::USD);
        cart.add(shirt.clone(), 1, None).unwrap();
        cart.add(shirt, 2, Some(large)).unwrap();

        let restored: Cart = versioned::decode(&versioned::encode(&cart).unwrap()).unwrap();

        assert_eq!(restored, cart);
        let variant = restored.items()[1]
            .selected_variant
            .as_ref()
            .expect("variant line");
        assert_eq!(variant.id, VariantId::new(3));
        assert_eq!(variant.price, Some(Money::new(2250, Currency::USD)));
        assert_eq!(variant.option_values.get("Size").map(String::as_str), Some("L"));
        assert_eq!(variant.option_values.get("Color").map(String::as_str), Some("Sand"));
        assert_eq!(restored.total_price().unwrap(), Money::new(6500, Currency::USD));
    }

    #[test]
    fn test_legacy_array_is_migrated() {
        let bytes = serde_json::to_vec(&json!([
            {
                "product": {"id": 12, "name": "Shirt", "price": "20.00", "stock": 3},
                "quantity": 2,
                "selectedVariant": {"id": 3, "price": "22.50", "option_values": {"Size": "L"}}
            },
            {
                "product": {"id": 13, "title": "Gift", "price": 15},
                "quantity": 1,
                "selectedVariant": null
            }
        ]))
        .unwrap();

        let cart: Cart = versioned::decode(&bytes).unwrap();

        assert_eq!(cart.currency, Currency::USD);
        assert_eq!(cart.line_count(), 2);
        let first = &cart.items()[0];
        assert_eq!(first.product.id, ProductId::new(12));
        assert_eq!(
            first.selected_variant.as_ref().map(|v| v.id),
            Some(VariantId::new(3))
        );
        assert_eq!(cart.total_price().unwrap(), Money::new(6000, Currency::USD));
    }

    #[test]
    fn test_legacy_bad_items_are_dropped() {
        let cart = migrate_legacy(json!([
            {"product": {"name": "no id", "price": "1.00"}, "quantity": 1},
            {"product": {"id": 5, "name": "zero", "price": "1.00"}, "quantity": 0},
            {"product": {"id": 6, "name": "ok", "price": "1.00"}, "quantity": 1}
        ]))
        .unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].product.id, ProductId::new(6));
    }

    #[test]
    fn test_legacy_non_array_fails() {
        let result = migrate_legacy(json!({"items": "nope"}));
        assert!(matches!(result, Err(CacheError::Migration { from: 0, .. })));
    }
}
