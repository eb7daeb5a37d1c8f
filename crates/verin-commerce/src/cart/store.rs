//! The persistent cart store.

use tracing::{debug, error, warn};
use verin_cache::{Cache, KvStore};

use crate::cart::{Cart, CartProduct, LineItem, LineKey, SelectedVariant};
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::money::{Currency, Money};

/// Storage key the cart is written under.
pub const CART_STORAGE_KEY: &str = "verin_cart";

/// Owns the session's cart and keeps it in sync with durable storage.
///
/// There is exactly one store per client session. It is built by the session
/// root and lent out by `&mut`, so every operation runs to completion before
/// the next one starts. Every mutation rewrites the whole cart under the
/// storage key; storage failures are logged and never reach the caller.
///
/// # Example
///
/// ```rust
/// use verin_cache::MemoryStore;
/// use verin_commerce::cart::{CartProduct, CartStore};
/// use verin_commerce::ids::ProductId;
/// use verin_commerce::money::{Currency, Money};
///
/// let mut store = CartStore::open(MemoryStore::new());
/// let shirt = CartProduct {
///     id: ProductId::new(1),
///     name: "Shirt".into(),
///     price: Money::new(2000, Currency::USD),
///     stock: 5,
///     slug: None,
///     thumbnail_image: None,
/// };
///
/// store.add_to_cart(shirt, 2, None).unwrap();
/// assert_eq!(store.item_count(), 2);
/// assert_eq!(store.total_price().unwrap().display(), "$40.00");
/// ```
pub struct CartStore<S: KvStore> {
    cache: Cache<S>,
    key: String,
    cart: Cart,
    is_open: bool,
}

impl<S: KvStore> CartStore<S> {
    /// Open the store under the default key, restoring any saved cart.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Open the store under a custom key.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        Self::open_with(storage, key, Currency::default())
    }

    /// Open the store, starting a fresh cart in `currency` when nothing is saved.
    ///
    /// A saved cart keeps the currency it was written with.
    pub fn open_with(storage: S, key: impl Into<String>, currency: Currency) -> Self {
        let cache = Cache::new(storage);
        let key = key.into();

        let cart = match cache.get_versioned::<Cart>(&key) {
            Ok(Some(cart)) => {
                debug!(key = %key, lines = cart.line_count(), "restored cart");
                cart
            }
            Ok(None) => Cart::new(currency),
            Err(e) => {
                warn!(key = %key, error = %e, "failed to load saved cart, starting empty");
                Cart::new(currency)
            }
        };

        Self {
            cache,
            key,
            cart,
            is_open: false,
        }
    }

    /// Add `quantity` of a product, merging with an existing line for the
    /// same product and variant.
    pub fn add_to_cart(
        &mut self,
        product: CartProduct,
        quantity: u32,
        variant: Option<SelectedVariant>,
    ) -> Result<(), CommerceError> {
        let product_id = product.id;
        self.cart.add(product, quantity, variant)?;
        debug!(product = %product_id, quantity, "added to cart");
        self.persist();
        Ok(())
    }

    /// Remove the line for a product and variant. Returns whether it existed.
    pub fn remove_from_cart(&mut self, product_id: ProductId, variant_id: Option<VariantId>) -> bool {
        let removed = self.cart.remove(&LineKey::new(product_id, variant_id));
        if removed {
            debug!(product = %product_id, "removed from cart");
            self.persist();
        }
        removed
    }

    /// Set the exact quantity of a line; zero or below removes it.
    ///
    /// Returns whether a line matched, or `InvalidQuantity` when the
    /// quantity does not fit a line.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        variant_id: Option<VariantId>,
    ) -> Result<bool, CommerceError> {
        let changed = self
            .cart
            .set_quantity(&LineKey::new(product_id, variant_id), quantity)?;
        if changed {
            debug!(product = %product_id, quantity, "updated cart quantity");
            self.persist();
        }
        Ok(changed)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("cleared cart");
        self.persist();
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Sum of effective unit price times quantity.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.cart.total_price()
    }

    pub fn is_cart_open(&self) -> bool {
        self.is_open
    }

    /// Show or hide the cart. Not persisted.
    pub fn set_cart_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.cart.get(key)
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Flush one last time and hand the storage back.
    pub fn close(self) -> S {
        self.persist();
        self.cache.into_inner()
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set_versioned(&self.key, &self.cart) {
            error!(key = %self.key, error = %e, "failed to save cart");
        }
    }
}
