//! Checkout module.
//!
//! Contains the order draft, the payload sent to the order service, the
//! submission state machine, and the confirmation route.

mod confirmation;
mod draft;
mod flow;
mod order;

pub use confirmation::{Confirmation, ConfirmationView, SUCCESS_PATH};
pub use draft::{DraftField, FieldError, OrderDraft};
pub use flow::{CheckoutError, CheckoutFlow, CheckoutState};
pub use order::{CreatedOrder, OrderGateway, OrderLine, OrderPayload};
