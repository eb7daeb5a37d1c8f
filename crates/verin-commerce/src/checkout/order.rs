//! Order payloads and the order service seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::checkout::OrderDraft;
use crate::ids::{OrderId, ProductId, VariantId};
use crate::CommerceError;

/// Fixed delivery charge; delivery pricing happens server side.
const DELIVERY_CHARGE: &str = "0.00";

/// One line of an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
    /// Effective unit price, two decimals.
    pub price: String,
}

/// The body of `POST /api/order/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub shipping_address: String,
    pub city: String,
    pub note: String,
    pub total_amount: String,
    pub delivery_charge: String,
    pub items: Vec<OrderLine>,
}

impl OrderPayload {
    /// Build the request for a validated draft and the current cart.
    pub fn build(draft: &OrderDraft, cart: &Cart) -> Result<Self, CommerceError> {
        let items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id,
                variant_id: item.selected_variant.as_ref().map(|v| v.id),
                quantity: item.quantity,
                price: item.unit_price().display_amount(),
            })
            .collect();

        Ok(Self {
            customer_name: draft.customer_name.trim().to_string(),
            customer_email: draft.customer_email.trim().to_string(),
            customer_phone: draft.customer_phone.trim().to_string(),
            customer_address: draft.customer_address.trim().to_string(),
            shipping_address: draft.effective_shipping_address().to_string(),
            city: draft.city.trim().to_string(),
            note: draft.note.as_deref().unwrap_or("").trim().to_string(),
            total_amount: cart.total_price()?.display_amount(),
            delivery_charge: DELIVERY_CHARGE.to_string(),
            items,
        })
    }
}

/// The order service's reply; only the id is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreatedOrder {
    pub fn new(id: impl Into<OrderId>) -> Self {
        Self {
            id: id.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Something that can place orders.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit an order. Any failure, including a non-2xx reply, is an error.
    async fn create_order(&self, payload: &OrderPayload) -> Result<CreatedOrder, CommerceError>;
}
