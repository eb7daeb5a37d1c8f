//! Shopping cart module.
//!
//! Contains the cart, its line items, and the persistent cart store.

mod cart;
mod line_item;
mod snapshot;
mod store;

pub use cart::Cart;
pub use line_item::{CartProduct, LineItem, LineKey, SelectedVariant};
pub use store::{CartStore, CART_STORAGE_KEY};
