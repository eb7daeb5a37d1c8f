//! User-facing notices raised by cart, checkout and form operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed notice texts.
pub mod messages {
    pub const EMPTY_CART: &str = "Your cart is empty";
    pub const ORDER_PLACED: &str = "Order placed successfully";
    pub const ORDER_FAILED: &str = "Failed to place order. Please try again.";
    pub const OUT_OF_STOCK: &str = "Product is out of stock";
    pub const MESSAGE_SENT: &str = "Message sent successfully";
    pub const MESSAGE_FAILED: &str = "Failed to send message";
    pub const SUBSCRIBED: &str = "Successfully subscribed to newsletter!";
    pub const SUBSCRIBE_FAILED: &str = "Failed to subscribe. Please try again.";
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// "<name> added to cart".
    pub fn added_to_cart(name: &str) -> Self {
        Self::success(format!("{} added to cart", name))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
