//! The customer details collected at checkout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::email::Email;

/// A field of the [`OrderDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    CustomerAddress,
    ShippingAddress,
    City,
    Note,
}

impl DraftField {
    /// Every field, in form order.
    pub const ALL: [DraftField; 7] = [
        DraftField::CustomerName,
        DraftField::CustomerEmail,
        DraftField::CustomerPhone,
        DraftField::CustomerAddress,
        DraftField::ShippingAddress,
        DraftField::City,
        DraftField::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::CustomerName => "customer_name",
            DraftField::CustomerEmail => "customer_email",
            DraftField::CustomerPhone => "customer_phone",
            DraftField::CustomerAddress => "customer_address",
            DraftField::ShippingAddress => "shipping_address",
            DraftField::City => "city",
            DraftField::Note => "note",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DraftField::CustomerName => "Full Name",
            DraftField::CustomerEmail => "Email Address",
            DraftField::CustomerPhone => "Phone Number",
            DraftField::CustomerAddress => "Address",
            DraftField::ShippingAddress => "Shipping Address",
            DraftField::City => "City",
            DraftField::Note => "Order Note",
        }
    }

    /// Whether the field must be filled in.
    pub fn is_required(&self) -> bool {
        !matches!(self, DraftField::ShippingAddress | DraftField::Note)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: DraftField,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.display_name(), self.reason)
    }
}

/// Customer and delivery details for one order.
///
/// Never persisted; owned by a single checkout flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    /// Falls back to `customer_address` when blank.
    pub shipping_address: Option<String>,
    pub city: String,
    pub note: Option<String>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field by name. Blank optional fields are stored as `None`.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::CustomerName => self.customer_name = value,
            DraftField::CustomerEmail => self.customer_email = value,
            DraftField::CustomerPhone => self.customer_phone = value,
            DraftField::CustomerAddress => self.customer_address = value,
            DraftField::ShippingAddress => self.shipping_address = non_blank(value),
            DraftField::City => self.city = value,
            DraftField::Note => self.note = non_blank(value),
        }
    }

    /// Current value of a field; empty for unset optional fields.
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::CustomerName => &self.customer_name,
            DraftField::CustomerEmail => &self.customer_email,
            DraftField::CustomerPhone => &self.customer_phone,
            DraftField::CustomerAddress => &self.customer_address,
            DraftField::ShippingAddress => self.shipping_address.as_deref().unwrap_or(""),
            DraftField::City => &self.city,
            DraftField::Note => self.note.as_deref().unwrap_or(""),
        }
    }

    /// The address to ship to.
    pub fn effective_shipping_address(&self) -> &str {
        match self.shipping_address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => address,
            _ => self.customer_address.trim(),
        }
    }

    /// Required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).trim().is_empty())
            .collect()
    }

    /// Check every field, collecting all failures.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors: Vec<FieldError> = self
            .missing_fields()
            .into_iter()
            .map(|field| FieldError {
                field,
                reason: "is required".to_string(),
            })
            .collect();

        if !self.customer_email.trim().is_empty() {
            if let Err(e) = Email::parse(&self.customer_email) {
                errors.push(FieldError {
                    field: DraftField::CustomerEmail,
                    reason: format!("is invalid ({})", e),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
