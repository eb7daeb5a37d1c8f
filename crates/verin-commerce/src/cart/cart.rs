//! The cart collection and its invariants.

use crate::cart::{CartProduct, LineItem, LineKey, SelectedVariant};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Items keep insertion order, quantities are always at least 1, and no two
/// items share a [`LineKey`]. Deserialized carts are rebuilt through
/// [`Cart::from_items`] so stored data cannot break those rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "CartData")]
pub struct Cart {
    /// Currency every item is priced in.
    pub currency: Currency,
    items: Vec<LineItem>,
}

#[derive(Deserialize)]
struct CartData {
    #[serde(default)]
    currency: Currency,
    #[serde(default)]
    items: Vec<LineItem>,
}

impl TryFrom<CartData> for Cart {
    type Error = CommerceError;

    fn try_from(data: CartData) -> Result<Self, Self::Error> {
        Cart::from_items(data.currency, data.items)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Rebuild a cart from raw items, merging duplicate keys and dropping
    /// zero quantities.
    pub fn from_items(
        currency: Currency,
        items: impl IntoIterator<Item = LineItem>,
    ) -> Result<Self, CommerceError> {
        let mut cart = Self::new(currency);
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            cart.add(item.product, item.quantity, item.selected_variant)?;
        }
        Ok(cart)
    }

    /// Add a product, merging into an existing line with the same key.
    ///
    /// Returns an error if:
    /// - Quantity is zero
    /// - The price currency differs from the cart currency
    /// - The merged quantity or line total would overflow
    pub fn add(
        &mut self,
        product: CartProduct,
        quantity: u32,
        variant: Option<SelectedVariant>,
    ) -> Result<(), CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }

        let key = LineKey::new(product.id, variant.as_ref().map(|v| v.id));

        if let Some(existing) = self.items.iter_mut().find(|i| i.key() == key) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            existing
                .unit_price()
                .try_multiply(i64::from(new_quantity))
                .ok_or(CommerceError::Overflow)?;
            existing.quantity = new_quantity;
            return Ok(());
        }

        let item = LineItem {
            product,
            selected_variant: variant,
            quantity,
        };
        let unit = item.unit_price();
        if unit.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit.currency.code().to_string(),
            });
        }
        item.line_total()?;

        self.items.push(item);
        Ok(())
    }

    /// Set the exact quantity of a line.
    ///
    /// A quantity of zero or below removes the line. Returns whether a line
    /// matched. Quantities above `u32::MAX` are rejected and leave the line
    /// as it was.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(key));
        }
        let exact = u32::try_from(quantity).map_err(|_| CommerceError::InvalidQuantity(quantity))?;
        let Some(item) = self.items.iter_mut().find(|i| &i.key() == key) else {
            return Ok(false);
        };
        item.unit_price()
            .try_multiply(i64::from(exact))
            .ok_or(CommerceError::Overflow)?;
        item.quantity = exact;
        Ok(true)
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.key() != key);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by key.
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key() == key)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of effective unit price times quantity over all lines.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.items
            .iter()
            .try_fold(Money::zero(self.currency), |acc, item| {
                let line = item.line_total()?;
                acc.try_add(&line).ok_or_else(|| {
                    if line.currency != acc.currency {
                        CommerceError::CurrencyMismatch {
                            expected: acc.currency.code().to_string(),
                            got: line.currency.code().to_string(),
                        }
                    } else {
                        CommerceError::Overflow
                    }
                })
            })
    }
}
