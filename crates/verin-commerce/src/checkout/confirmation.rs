//! Order confirmation routing.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::ids::OrderId;

/// Path of the confirmation page.
pub const SUCCESS_PATH: &str = "/checkout/success";

const ORDER_ID_PARAM: &str = "orderId";

/// The result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub order_id: OrderId,
    /// Where to navigate next, e.g. `/checkout/success?orderId=123`.
    pub route: String,
}

impl Confirmation {
    pub fn new(order_id: OrderId) -> Self {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(ORDER_ID_PARAM, order_id.as_str())
            .finish();
        let route = format!("{}?{}", SUCCESS_PATH, query);
        Self { order_id, route }
    }
}

/// What the confirmation page shows for a given query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ConfirmationView {
    /// Show the order.
    Order { order_id: OrderId },
    /// No order to show; go to the home page.
    RedirectHome,
}

impl ConfirmationView {
    /// Resolve a route, URL or bare query string.
    ///
    /// Needs a non-empty `orderId` parameter.
    pub fn resolve(input: &str) -> Self {
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            None => input,
        };
        let query = query.split('#').next().unwrap_or("");

        form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == ORDER_ID_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| ConfirmationView::Order {
                order_id: OrderId::new(value),
            })
            .unwrap_or(ConfirmationView::RedirectHome)
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            ConfirmationView::Order { order_id } => Some(order_id),
            ConfirmationView::RedirectHome => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_route() {
        let confirmation = Confirmation::new(OrderId::new("123"));
        assert_eq!(confirmation.route, "/checkout/success?orderId=123");
    }

    #[test]
    fn test_resolve_forms() {
        let expected = ConfirmationView::Order {
            order_id: OrderId::new("123"),
        };
        assert_eq!(ConfirmationView::resolve("/checkout/success?orderId=123"), expected);
        assert_eq!(
            ConfirmationView::resolve("https://shop.example/checkout/success?x=1&orderId=123#top"),
            expected
        );
        assert_eq!(ConfirmationView::resolve("orderId=123"), expected);
    }

    #[test]
    fn test_route_escapes_order_id() {
        let confirmation = Confirmation::new(OrderId::new("A&B 7"));
        assert_eq!(confirmation.route, "/checkout/success?orderId=A%26B+7");
        assert_eq!(
            ConfirmationView::resolve(&confirmation.route).order_id(),
            Some(&OrderId::new("A&B 7"))
        );
    }

    #[test]
    fn test_resolve_decodes_order_id() {
        assert_eq!(
            ConfirmationView::resolve("/checkout/success?orderId=ORD%2D7").order_id(),
            Some(&OrderId::new("ORD-7"))
        );
    }

    #[test]
    fn test_resolve_without_order_redirects_home() {
        assert_eq!(
            ConfirmationView::resolve("/checkout/success"),
            ConfirmationView::RedirectHome
        );
        assert_eq!(
            ConfirmationView::resolve("/checkout/success?orderId="),
            ConfirmationView::RedirectHome
        );
        assert_eq!(
            ConfirmationView::resolve("/checkout/success?orderid=5"),
            ConfirmationView::RedirectHome
        );
        assert_eq!(ConfirmationView::RedirectHome.order_id(), None);
    }
}
