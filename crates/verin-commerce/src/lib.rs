//! Storefront domain types and logic for Verin.
//!
//! This crate provides the client-side core of the storefront:
//!
//! - **Catalog**: Products, variants, categories
//! - **Listing**: Product/category/blog queries and paginated results
//! - **Cart**: Line items, the cart, and the persistent [`CartStore`]
//! - **Checkout**: Order draft, order payload, submission state machine
//! - **Content**: Blog posts, FAQs, testimonials, newsletter and contact forms
//!
//! # Example
//!
//! ```rust
//! use verin_cache::MemoryStore;
//! use verin_commerce::prelude::*;
//!
//! let product = CartProduct::normalize(
//!     &serde_json::json!({"id": 12, "name": "Linen Shirt", "price": "20.00"}),
//!     Currency::USD,
//! )
//! .unwrap();
//!
//! let mut cart = CartStore::open(MemoryStore::new());
//! cart.add_to_cart(product.clone(), 1, None).unwrap();
//! cart.add_to_cart(product, 2, None).unwrap();
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.total_price().unwrap().display(), "$60.00");
//! ```
//!
//! [`CartStore`]: cart::CartStore

pub mod error;
pub mod ids;
pub mod money;
pub mod notice;

mod email;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod content;
pub mod listing;

pub use email::{Email, EmailError};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use notice::{Notice, NoticeLevel};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::email::Email;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::notice::{Notice, NoticeLevel};

    // Catalog
    pub use crate::catalog::{ensure_purchasable, Category, CategoryRef, Product, ProductVariant};

    // Listing
    pub use crate::listing::{Page, PageQuery, ProductQuery};

    // Cart
    pub use crate::cart::{Cart, CartProduct, CartStore, LineItem, LineKey, SelectedVariant};

    // Checkout
    pub use crate::checkout::{
        CheckoutError, CheckoutFlow, CheckoutState, Confirmation, ConfirmationView, CreatedOrder,
        DraftField, OrderDraft, OrderGateway, OrderPayload,
    };

    // Content
    pub use crate::content::{
        BlogPost, ContactForm, ContactSubmission, Faq, NewsletterSubscription, Testimonial,
    };
}
