//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product data could not be normalized for the cart.
    #[error("Invalid product: {field} {reason}")]
    InvalidProduct { field: &'static str, reason: String },

    /// Product has no stock left.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Price or amount could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// The order service rejected or failed the request.
    #[error("Order request failed: {0}")]
    Gateway(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
